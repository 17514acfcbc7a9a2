use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::placement::{ChestGrid, MonsterCell, MonsterGrid, ObjectCell};
use crate::rng::{self, CaveRng};
use crate::tiles::TileMap;
use crate::types::{CellGrid, Pos};

/// How the per-chest monster cap is enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapPolicy {
    /// Capped chests stop rolling and the first successful chest claims the
    /// cell, so no chest is ever credited past the cap.
    #[default]
    Strict,
    /// Every chest in range rolls and counts its successes; the cell gets a
    /// monster when the last successful chest is still within the cap. A
    /// chest's counter can run past the cap.
    Lenient,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterPlacer {
    pub monster_radius: u32,
    pub monster_prob: f64,
    pub max_monsters: u32,
    pub cap_policy: CapPolicy,
}

impl Default for MonsterPlacer {
    fn default() -> Self {
        Self {
            monster_radius: 3,
            monster_prob: 0.2,
            max_monsters: 3,
            cap_policy: CapPolicy::Strict,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterPlacement {
    pub grid: MonsterGrid,
    /// Successful rolls per chest, keyed by the chest's row-major cell index.
    pub credited: BTreeMap<usize, u32>,
}

impl MonsterPlacer {
    pub fn place(
        &self,
        tiles: &TileMap,
        objects: &ChestGrid,
        rng: &mut CaveRng,
    ) -> MonsterPlacement {
        let mut grid = CellGrid::filled(tiles.width(), tiles.height(), MonsterCell::Empty);
        let mut credited = BTreeMap::new();

        for pos in tiles.positions() {
            let occupied = !objects[pos].is_empty() || grid[pos] == MonsterCell::Monster;
            if !tiles[pos].is_floor() || occupied {
                continue;
            }
            let spawn = match self.cap_policy {
                CapPolicy::Strict => self.roll_strict(objects, pos, &mut credited, rng),
                CapPolicy::Lenient => self.roll_lenient(objects, pos, &mut credited, rng),
            };
            if spawn {
                grid.set(pos, MonsterCell::Monster);
            }
        }

        debug!("placed {} monsters around {} chests", grid.monster_count(), credited.len());
        MonsterPlacement { grid, credited }
    }

    fn chests_in_range(&self, objects: &ChestGrid, pos: Pos) -> impl Iterator<Item = usize> {
        objects
            .chebyshev_disk(pos, self.monster_radius)
            .filter(|near| objects[*near] == ObjectCell::Chest)
            .filter_map(|near| objects.index_of(near))
    }

    fn roll_strict(
        &self,
        objects: &ChestGrid,
        pos: Pos,
        credited: &mut BTreeMap<usize, u32>,
        rng: &mut CaveRng,
    ) -> bool {
        for chest in self.chests_in_range(objects, pos) {
            if credited.get(&chest).copied().unwrap_or(0) >= self.max_monsters {
                continue;
            }
            if rng::roll(rng, self.monster_prob) {
                *credited.entry(chest).or_insert(0) += 1;
                return true;
            }
        }
        false
    }

    fn roll_lenient(
        &self,
        objects: &ChestGrid,
        pos: Pos,
        credited: &mut BTreeMap<usize, u32>,
        rng: &mut CaveRng,
    ) -> bool {
        let mut spawn = false;
        for chest in self.chests_in_range(objects, pos) {
            if rng::roll(rng, self.monster_prob) {
                let count = credited.entry(chest).or_insert(0);
                *count += 1;
                spawn = *count <= self.max_monsters;
            }
        }
        spawn
    }
}
