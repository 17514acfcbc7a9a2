use anyhow::{Result, bail};
use cavegen::placement::CapPolicy;
use cavegen::tiles::classifier::axis_walls;
use cavegen::{
    CaveGenerator, GeneratorConfig, ObjectCell, Pos, RuleConfig, TileCategory, UpdateMode,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    #[arg(short, long, default_value_t = 8)]
    ticks: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn range(rng: &mut ChaCha8Rng, low: u64, high: u64) -> u64 {
    low + rng.next_u64() % (high - low)
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

fn random_config(rng: &mut ChaCha8Rng) -> GeneratorConfig {
    let width = range(rng, 3, 64) as usize;
    let height = range(rng, 3, 64) as usize;
    let limit = width.min(height) as u64;
    let rules = [
        RuleConfig::NeighborThreshold { min: 5 },
        RuleConfig::NeighborThreshold { min: 4 },
        RuleConfig::ExactCount { count: 5 },
        RuleConfig::MoreThan { count: 6 },
        RuleConfig::FewerThan { count: 2 },
        RuleConfig::EvenCount,
        RuleConfig::PrimeCount,
        RuleConfig::BirthSurvival { birth: 5, survive: 4 },
        RuleConfig::AreaThreshold { radius: 1, min: 5 },
    ];
    GeneratorConfig {
        width,
        height,
        initial_wall_prob: unit(rng),
        rule: choose(rng, &rules),
        update_mode: choose(rng, &[UpdateMode::Synchronous, UpdateMode::RandomOrder]),
        ground_variant_prob: unit(rng),
        chest_prob: unit(rng),
        bag_prob: unit(rng),
        chest_radius: range(rng, 0, limit) as u32,
        monster_radius: range(rng, 0, limit) as u32,
        monster_prob: unit(rng),
        max_monsters: range(rng, 0, 6) as u32,
        cap_policy: CapPolicy::Strict,
        keep_previous: rng.next_u64() % 2 == 0,
        ..GeneratorConfig::default()
    }
}

fn check_invariants(generator: &CaveGenerator) -> Result<()> {
    let grid = generator.grid();
    let tiles = generator.tiles();
    if !grid.border_is_solid() {
        bail!("border lost its walls at tick {}", generator.ticks());
    }

    for (pos, tile) in tiles.iter() {
        let solid = grid.is_solid(pos);
        if tile.is_floor() == solid {
            bail!("tile {tile:?} at {pos:?} disagrees with solid={solid}");
        }
        if (*tile == TileCategory::Void) != (solid && grid.is_enclosed(pos)) {
            bail!("void classification wrong at {pos:?}");
        }
        if let Some(dirs) = tile.direction_set()
            && dirs != axis_walls(tiles, pos)
        {
            bail!("connector {tile:?} at {pos:?} does not match its neighbors");
        }
    }

    let config = generator.config();
    let chests: Vec<Pos> = generator
        .objects()
        .iter()
        .filter(|(_, cell)| **cell == ObjectCell::Chest)
        .map(|(pos, _)| pos)
        .collect();
    for (i, a) in chests.iter().enumerate() {
        if let Some(b) = chests[i + 1..].iter().find(|b| a.chebyshev(**b) <= config.chest_radius) {
            bail!("chests at {a:?} and {b:?} within radius {}", config.chest_radius);
        }
    }

    let monsters = generator.monsters();
    if let Some((chest, count)) =
        monsters.credited.iter().find(|&(_, &count)| count > config.max_monsters)
    {
        bail!("chest #{chest} credited with {count} monsters (cap {})", config.max_monsters);
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let seed = rng.next_u64();
        let mut generator = CaveGenerator::new(config.clone(), seed)?;
        for _ in 0..=args.ticks {
            if let Err(error) = check_invariants(&generator) {
                bail!("run {run} (seed {seed}, config {config:?}): {error}");
            }
            generator.tick();
        }
    }

    println!("All {} runs preserved the invariants.", args.runs);
    Ok(())
}
