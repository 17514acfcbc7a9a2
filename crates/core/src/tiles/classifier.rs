//! Two-pass classification of a solid grid into tile categories.
//!
//! Pass 1 separates solid cells into `Void` (fully enclosed) and `Isolated`
//! and rolls cosmetic ground variants for empty cells. Pass 2 revisits every
//! wall and picks a connector from the wall status of its axis neighbors, read
//! from the pass-1 snapshot so the scan order cannot leak into the result.

use crate::rng::{self, CaveRng};
use crate::terrain::Grid;
use crate::tiles::{Connector, DirectionSet, GroundVariant, TileCategory, TileMap, sprites};
use crate::types::{CellGrid, Pos};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileClassifier {
    /// Chance that a floor tile gets a stone or bones variant.
    pub ground_variant_prob: f64,
}

impl Default for TileClassifier {
    fn default() -> Self {
        Self { ground_variant_prob: 0.05 }
    }
}

impl TileClassifier {
    pub fn new(ground_variant_prob: f64) -> Self {
        Self { ground_variant_prob }
    }

    pub fn classify(&self, grid: &Grid, rng: &mut CaveRng) -> TileMap {
        let base = self.classify_solidity(grid, rng);
        resolve_connectors(&base, rng)
    }

    fn classify_solidity(&self, grid: &Grid, rng: &mut CaveRng) -> TileMap {
        let mut tiles = Vec::with_capacity(grid.width() * grid.height());
        for pos in grid.cells().positions() {
            let tile = if !grid.is_solid(pos) {
                TileCategory::Ground(self.roll_ground(rng))
            } else if grid.is_enclosed(pos) {
                TileCategory::Void
            } else {
                TileCategory::Isolated
            };
            tiles.push(tile);
        }
        CellGrid::from_cells(grid.width(), grid.height(), tiles)
    }

    fn roll_ground(&self, rng: &mut CaveRng) -> GroundVariant {
        if !rng::roll(rng, self.ground_variant_prob) {
            return GroundVariant::Plain;
        }
        if rng::roll(rng, 0.5) { GroundVariant::Stone } else { GroundVariant::Bones }
    }
}

/// Wall status of the four axis neighbors; neighbors outside the map are
/// absent rather than walls.
pub fn axis_walls(tiles: &TileMap, pos: Pos) -> DirectionSet {
    let is_wall =
        |dx: i32, dy: i32| tiles.get(pos.offset(dx, dy)).is_some_and(|tile| tile.is_wall());
    DirectionSet {
        up: is_wall(0, -1),
        down: is_wall(0, 1),
        left: is_wall(-1, 0),
        right: is_wall(1, 0),
    }
}

fn resolve_connectors(base: &TileMap, rng: &mut CaveRng) -> TileMap {
    let mut resolved = base.clone();
    for (pos, tile) in base.iter() {
        if !tile.is_wall() {
            continue;
        }
        let category = match Connector::resolve(axis_walls(base, pos)) {
            Some(connector) => {
                let variant = match sprites::variant_count(connector) {
                    1 => 0,
                    count => rng::random_index(rng, usize::from(count)) as u8,
                };
                TileCategory::Wall { connector, variant }
            }
            None => TileCategory::Isolated,
        };
        resolved.set(pos, category);
    }
    resolved
}
