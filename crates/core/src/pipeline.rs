//! Tick orchestration: simulate, reclassify, then repopulate objects and
//! monsters, all from one seeded generator.

use std::mem;

use log::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::ConfigError;
use crate::model::GeneratedCave;
use crate::placement::{ChestGrid, MonsterPlacement};
use crate::rng::{self, CaveRng};
use crate::terrain::{Grid, TerrainSimulator};
use crate::tiles::TileMap;

/// Runs a fixed number of steps and returns the result.
pub fn generate(config: &GeneratorConfig, seed: u64) -> Result<GeneratedCave, ConfigError> {
    let mut generator = CaveGenerator::new(config.clone(), seed)?;
    generator.run(config.steps);
    let cave = generator.into_cave();
    info!(
        "generated {}x{} cave (seed {seed}, {} steps): {} walls, {} chests, {} monsters",
        cave.width(),
        cave.height(),
        cave.ticks,
        cave.wall_count(),
        cave.chest_count(),
        cave.monster_count()
    );
    Ok(cave)
}

#[derive(Debug)]
pub struct CaveGenerator {
    config: GeneratorConfig,
    seed: u64,
    rng: CaveRng,
    simulator: TerrainSimulator,
    grid: Grid,
    tiles: TileMap,
    objects: ChestGrid,
    monsters: MonsterPlacement,
    previous_tiles: Option<TileMap>,
    ticks: u32,
}

impl CaveGenerator {
    /// Seeds the generator, rolls the initial grid and derives every layer
    /// for tick 0.
    pub fn new(config: GeneratorConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = rng::seeded(seed);
        let grid = Grid::random(config.width, config.height, config.initial_wall_prob, &mut rng);
        Ok(Self::assemble(config, seed, rng, grid))
    }

    /// Starts from a caller-supplied grid. The grid's dimensions replace the
    /// configured ones.
    pub fn with_grid(config: GeneratorConfig, seed: u64, grid: Grid) -> Result<Self, ConfigError> {
        let config = GeneratorConfig { width: grid.width(), height: grid.height(), ..config };
        config.validate()?;
        Ok(Self::assemble(config, seed, rng::seeded(seed), grid))
    }

    fn assemble(config: GeneratorConfig, seed: u64, mut rng: CaveRng, grid: Grid) -> Self {
        let simulator = config.simulator();
        let tiles = config.classifier().classify(&grid, &mut rng);
        let objects = config.object_placer().place(&tiles, &mut rng);
        let monsters = config.monster_placer().place(&tiles, &objects, &mut rng);
        debug!(
            "seeded {}x{} grid with {} solid cells",
            grid.width(),
            grid.height(),
            grid.solid_count()
        );
        Self {
            config,
            seed,
            rng,
            simulator,
            grid,
            tiles,
            objects,
            monsters,
            previous_tiles: None,
            ticks: 0,
        }
    }

    /// One full tick. Returns the new wall count.
    pub fn tick(&mut self) -> usize {
        self.grid = self.simulator.step(&self.grid, &mut self.rng);

        let tiles = self.config.classifier().classify(&self.grid, &mut self.rng);
        let previous = mem::replace(&mut self.tiles, tiles);
        if self.config.keep_previous {
            self.previous_tiles = Some(previous);
        }
        self.objects = self.config.object_placer().place(&self.tiles, &mut self.rng);
        self.monsters =
            self.config.monster_placer().place(&self.tiles, &self.objects, &mut self.rng);
        self.ticks += 1;

        let walls = self.tiles.wall_count();
        debug!("tick {}: {walls} walls, {} solid cells", self.ticks, self.grid.solid_count());
        walls
    }

    pub fn run(&mut self, steps: u32) {
        for _ in 0..steps {
            self.tick();
        }
    }

    /// Ticks until the wall count stops changing, or `max_ticks` ticks have
    /// run. Returns the number of ticks run by this call.
    pub fn run_until_stable(&mut self, max_ticks: u32) -> u32 {
        let mut walls = self.tiles.wall_count();
        for ran in 1..=max_ticks {
            let next = self.tick();
            if next == walls {
                debug!("walls stable at {next} after {ran} ticks");
                return ran;
            }
            walls = next;
        }
        max_ticks
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn objects(&self) -> &ChestGrid {
        &self.objects
    }

    pub fn monsters(&self) -> &MonsterPlacement {
        &self.monsters
    }

    pub fn previous_tiles(&self) -> Option<&TileMap> {
        self.previous_tiles.as_ref()
    }

    pub fn snapshot(&self) -> GeneratedCave {
        GeneratedCave {
            seed: self.seed,
            ticks: self.ticks,
            grid: self.grid.clone(),
            tiles: self.tiles.clone(),
            objects: self.objects.clone(),
            monsters: self.monsters.grid.clone(),
            monsters_per_chest: self.monsters.credited.clone(),
            previous_tiles: self.previous_tiles.clone(),
        }
    }

    pub fn into_cave(self) -> GeneratedCave {
        GeneratedCave {
            seed: self.seed,
            ticks: self.ticks,
            grid: self.grid,
            tiles: self.tiles,
            objects: self.objects,
            monsters: self.monsters.grid,
            monsters_per_chest: self.monsters.credited,
            previous_tiles: self.previous_tiles,
        }
    }
}
