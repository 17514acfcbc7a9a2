use std::path::PathBuf;

use anyhow::{Context, Result};
use cavegen::{CaveGenerator, GeneratorConfig, IdFormat, UpdateMode, rng};
use clap::{Parser, ValueEnum};
use log::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IdFormatArg {
    Symbolic,
    Texture,
}

impl From<IdFormatArg> for IdFormat {
    fn from(arg: IdFormatArg) -> Self {
        match arg {
            IdFormatArg::Symbolic => IdFormat::Symbolic,
            IdFormatArg::Texture => IdFormat::Texture,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UpdateModeArg {
    Synchronous,
    RandomOrder,
}

impl From<UpdateModeArg> for UpdateMode {
    fn from(arg: UpdateModeArg) -> Self {
        match arg {
            UpdateModeArg::Synchronous => UpdateMode::Synchronous,
            UpdateModeArg::RandomOrder => UpdateMode::RandomOrder,
        }
    }
}

/// Generate a cave map and write it as a layered JSON document.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with generator settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the run; a fresh one is generated and printed when absent
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Simulation steps to run
    #[arg(long)]
    steps: Option<u32>,
    #[arg(long, value_enum)]
    mode: Option<UpdateModeArg>,
    /// Keep stepping until the wall count stops changing
    #[arg(long)]
    until_stable: bool,
    /// Upper bound on ticks for --until-stable
    #[arg(long, default_value_t = 100)]
    max_ticks: u32,
    /// Also export the tile map from before the last step
    #[arg(long)]
    previous: bool,
    #[arg(long, value_enum, default_value = "symbolic")]
    id_format: IdFormatArg,
    #[arg(short, long, default_value = "map.json")]
    output: PathBuf,
}

impl Args {
    fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(mode) = self.mode {
            config.update_mode = mode.into();
        }
        config.keep_previous |= self.previous;
        config.validate().context("Invalid generator settings")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.resolve_config()?;
    let seed = args.seed.unwrap_or_else(rng::generate_runtime_seed);
    info!("generating with seed {seed}");

    let mut generator = CaveGenerator::new(config.clone(), seed)?;
    if args.until_stable {
        generator.run_until_stable(args.max_ticks);
    } else {
        generator.run(config.steps);
    }
    let cave = generator.into_cave();

    let document = cave.to_document(args.id_format.into());
    document
        .write_atomic(&args.output)
        .with_context(|| format!("Failed to export map to {}", args.output.display()))?;

    println!("Generation complete.");
    println!("Seed: {seed}");
    println!("Size: {}x{}", cave.width(), cave.height());
    println!("Ticks: {}", cave.ticks);
    println!("Walls: {}", cave.wall_count());
    println!(
        "Chests: {} Bags: {} Monsters: {}",
        cave.chest_count(),
        cave.bag_count(),
        cave.monster_count()
    );
    println!("Fingerprint: {:#018x}", cave.fingerprint());
    println!("Output: {}", args.output.display());

    Ok(())
}
