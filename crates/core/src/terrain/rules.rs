//! Transition predicates. Every rule answers "is this cell solid in the next
//! generation?" from the neighbor-counting primitives on [`Grid`]; the
//! simulator pins the border on top of whatever a rule says.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::terrain::grid::Grid;
use crate::types::Pos;

pub trait CaveRule: fmt::Debug {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool;
}

/// Solid iff at least `min` of the 8 Moore neighbors are solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborThreshold {
    pub min: u32,
}

impl CaveRule for NeighborThreshold {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool {
        grid.solid_neighbors(pos) >= self.min
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExactCount {
    pub count: u32,
}

impl CaveRule for ExactCount {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool {
        grid.solid_neighbors(pos) == self.count
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoreThan {
    pub count: u32,
}

impl CaveRule for MoreThan {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool {
        grid.solid_neighbors(pos) > self.count
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FewerThan {
    pub count: u32,
}

impl CaveRule for FewerThan {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool {
        grid.solid_neighbors(pos) < self.count
    }
}

/// Solid iff at least `min` cells of the `(2r+1)²` square are solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaThreshold {
    pub radius: u32,
    pub min: u32,
}

impl CaveRule for AreaThreshold {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool {
        grid.solid_in_area(pos, self.radius) >= self.min
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvenCount;

impl CaveRule for EvenCount {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool {
        grid.solid_neighbors(pos) % 2 == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimeCount;

impl CaveRule for PrimeCount {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool {
        matches!(grid.solid_neighbors(pos), 2 | 3 | 5 | 7)
    }
}

/// Separate thresholds for empty cells turning solid and solid cells staying
/// solid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BirthSurvival {
    pub birth: u32,
    pub survive: u32,
}

impl CaveRule for BirthSurvival {
    fn next_state(&self, grid: &Grid, pos: Pos) -> bool {
        let neighbors = grid.solid_neighbors(pos);
        if grid.is_solid(pos) { neighbors >= self.survive } else { neighbors >= self.birth }
    }
}

/// Serializable rule selection, e.g. `{ kind = "neighbor_threshold", min = 5 }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    NeighborThreshold { min: u32 },
    ExactCount { count: u32 },
    MoreThan { count: u32 },
    FewerThan { count: u32 },
    AreaThreshold { radius: u32, min: u32 },
    EvenCount,
    PrimeCount,
    BirthSurvival { birth: u32, survive: u32 },
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::NeighborThreshold { min: 5 }
    }
}

impl RuleConfig {
    pub fn build(self) -> Box<dyn CaveRule> {
        match self {
            Self::NeighborThreshold { min } => Box::new(NeighborThreshold { min }),
            Self::ExactCount { count } => Box::new(ExactCount { count }),
            Self::MoreThan { count } => Box::new(MoreThan { count }),
            Self::FewerThan { count } => Box::new(FewerThan { count }),
            Self::AreaThreshold { radius, min } => Box::new(AreaThreshold { radius, min }),
            Self::EvenCount => Box::new(EvenCount),
            Self::PrimeCount => Box::new(PrimeCount),
            Self::BirthSurvival { birth, survive } => Box::new(BirthSurvival { birth, survive }),
        }
    }

    pub fn validate(self, width: usize, height: usize) -> Result<(), ConfigError> {
        match self {
            Self::NeighborThreshold { min: count }
            | Self::ExactCount { count }
            | Self::MoreThan { count }
            | Self::FewerThan { count } => check_neighbor_count("count", count),
            Self::BirthSurvival { birth, survive } => {
                check_neighbor_count("birth", birth)?;
                check_neighbor_count("survive", survive)
            }
            Self::AreaThreshold { radius, min } => {
                let limit = width.min(height);
                if radius == 0 || radius as usize >= limit {
                    return Err(ConfigError::InvalidRule(format!(
                        "area radius {radius} must be in 1..{limit}"
                    )));
                }
                let area = (2 * radius + 1).pow(2);
                if min > area {
                    return Err(ConfigError::InvalidRule(format!(
                        "area threshold {min} exceeds the {area} cells of a radius-{radius} square"
                    )));
                }
                Ok(())
            }
            Self::EvenCount | Self::PrimeCount => Ok(()),
        }
    }
}

fn check_neighbor_count(name: &str, count: u32) -> Result<(), ConfigError> {
    if count > 8 {
        return Err(ConfigError::InvalidRule(format!(
            "{name} = {count} is outside the 0..=8 neighbor range"
        )));
    }
    Ok(())
}
