//! Cellular-automaton terrain: the solid/empty grid, the rule strategies that
//! evolve it, and the simulator that applies them.

pub mod grid;
pub mod rules;
pub mod simulator;

pub use grid::Grid;
pub use rules::{CaveRule, RuleConfig};
pub use simulator::{TerrainSimulator, UpdateMode};
