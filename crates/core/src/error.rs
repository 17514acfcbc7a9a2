//! Error taxonomy for configuration and export.
//!
//! Out-of-range neighbor probes are not represented here: every probe clamps
//! or skips, and indexing guards the invariant with `debug_assert!`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de::Error as TomlError;

/// Rejected before any simulation step runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be larger than 2x2 in both dimensions, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },
    #[error("{name} = {radius} must be smaller than the smallest grid dimension ({limit})")]
    RadiusTooLarge { name: &'static str, radius: u32, limit: usize },
    #[error("{name} = {value} is not a probability in [0, 1]")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("invalid terrain rule: {0}")]
    InvalidRule(String),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] TomlError),
}

/// The destination is left untouched when an export fails.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("map document JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write map document to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read map document from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
