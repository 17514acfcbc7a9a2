use log::debug;

use crate::placement::{ChestGrid, ObjectCell};
use crate::rng::{self, CaveRng};
use crate::tiles::TileMap;
use crate::types::{AXIS_OFFSETS, CellGrid, Pos};

/// Chest and bag placement over the floor of a tile map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectPlacer {
    /// `1.0` places a chest on every eligible cell.
    pub chest_prob: f64,
    /// Per-cell chance for the ring around a fresh chest.
    pub bag_prob: f64,
    /// No two chests closer than this (Chebyshev).
    pub chest_radius: u32,
}

impl Default for ObjectPlacer {
    fn default() -> Self {
        Self { chest_prob: 0.1, bag_prob: 0.45, chest_radius: 5 }
    }
}

impl ObjectPlacer {
    pub fn place(&self, tiles: &TileMap, rng: &mut CaveRng) -> ChestGrid {
        let mut objects = CellGrid::filled(tiles.width(), tiles.height(), ObjectCell::Empty);
        for pos in tiles.positions() {
            if !tiles[pos].is_floor() || !objects[pos].is_empty() {
                continue;
            }
            if !away_from_walls(tiles, pos) || self.chest_nearby(&objects, pos) {
                continue;
            }
            if !rng::roll(rng, self.chest_prob) {
                continue;
            }
            objects.set(pos, ObjectCell::Chest);
            self.scatter_bags(tiles, &mut objects, pos, rng);
        }
        debug!(
            "placed {} chests and {} bags",
            objects.count(ObjectCell::Chest),
            objects.count(ObjectCell::Bag)
        );
        objects
    }

    fn chest_nearby(&self, objects: &ChestGrid, pos: Pos) -> bool {
        objects
            .chebyshev_disk(pos, self.chest_radius)
            .any(|near| objects[near] == ObjectCell::Chest)
    }

    fn scatter_bags(
        &self,
        tiles: &TileMap,
        objects: &mut ChestGrid,
        chest: Pos,
        rng: &mut CaveRng,
    ) {
        for near in tiles.chebyshev_disk(chest, 1) {
            if near == chest || !tiles[near].is_floor() || objects[near] == ObjectCell::Chest {
                continue;
            }
            if rng::roll(rng, self.bag_prob) {
                objects.set(near, ObjectCell::Bag);
            }
        }
    }
}

/// Floor at distances 1 and 2 along every axis. Probes outside the
/// interior are not checked.
fn away_from_walls(tiles: &TileMap, pos: Pos) -> bool {
    AXIS_OFFSETS.iter().all(|&(dx, dy)| {
        (1..=2).all(|step| {
            let probe = pos.offset(dx * step, dy * step);
            !tiles.is_interior(probe) || tiles[probe].is_floor()
        })
    })
}
