//! Loot and monster layers placed on the floor of a classified tile map.

pub mod monsters;
pub mod objects;

pub use monsters::{CapPolicy, MonsterPlacement, MonsterPlacer};
pub use objects::ObjectPlacer;

use crate::types::CellGrid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ObjectCell {
    #[default]
    Empty,
    Chest,
    Bag,
}

impl ObjectCell {
    pub fn is_empty(self) -> bool {
        self == ObjectCell::Empty
    }

    pub fn symbolic_id(self) -> Option<&'static str> {
        match self {
            ObjectCell::Empty => None,
            ObjectCell::Chest => Some("CHEST"),
            ObjectCell::Bag => Some("BAG"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MonsterCell {
    #[default]
    Empty,
    Monster,
}

impl MonsterCell {
    pub fn symbolic_id(self) -> Option<&'static str> {
        match self {
            MonsterCell::Empty => None,
            MonsterCell::Monster => Some("MONSTER"),
        }
    }
}

pub type ChestGrid = CellGrid<ObjectCell>;
pub type MonsterGrid = CellGrid<MonsterCell>;

impl CellGrid<ObjectCell> {
    pub fn count(&self, cell: ObjectCell) -> usize {
        self.cells().iter().filter(|&&c| c == cell).count()
    }
}

impl CellGrid<MonsterCell> {
    pub fn monster_count(&self) -> usize {
        self.cells().iter().filter(|&&c| c == MonsterCell::Monster).count()
    }
}
