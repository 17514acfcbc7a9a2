pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod pipeline;
pub mod placement;
pub mod rng;
pub mod terrain;
pub mod tiles;
pub mod types;

pub use config::GeneratorConfig;
pub use error::{ConfigError, ExportError};
pub use export::{ExportLayer, IdFormat, MapDocument, MapExporter, TileRecord};
pub use model::GeneratedCave;
pub use pipeline::{CaveGenerator, generate};
pub use placement::{CapPolicy, ChestGrid, MonsterCell, MonsterGrid, ObjectCell};
pub use terrain::{Grid, RuleConfig, UpdateMode};
pub use tiles::{Connector, TileCategory, TileMap};
pub use types::*;
