//! A finished generation: every layer plus the metadata needed to reproduce it.

use std::collections::BTreeMap;

use xxhash_rust::xxh3::xxh3_64;

use crate::export::{IdFormat, MapDocument, MapExporter};
use crate::placement::{ChestGrid, MonsterCell, MonsterGrid, ObjectCell};
use crate::terrain::Grid;
use crate::tiles::{GroundVariant, TileCategory, TileMap};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedCave {
    pub seed: u64,
    pub ticks: u32,
    pub grid: Grid,
    pub tiles: TileMap,
    pub objects: ChestGrid,
    pub monsters: MonsterGrid,
    /// Monsters credited to each chest, keyed by the chest's cell index.
    pub monsters_per_chest: BTreeMap<usize, u32>,
    /// Tile map from before the last step, when the config asked for it.
    pub previous_tiles: Option<TileMap>,
}

impl GeneratedCave {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn wall_count(&self) -> usize {
        self.tiles.wall_count()
    }

    pub fn chest_count(&self) -> usize {
        self.objects.count(ObjectCell::Chest)
    }

    pub fn bag_count(&self) -> usize {
        self.objects.count(ObjectCell::Bag)
    }

    pub fn monster_count(&self) -> usize {
        self.monsters.monster_count()
    }

    /// Layout, tile categories (variants included) and object layers. The
    /// seed and tick count are left out so equal maps hash equal however
    /// they were reached.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for &solid in self.grid.cells().cells() {
            bytes.push(u8::from(solid));
        }
        push_tiles(&mut bytes, &self.tiles);
        for &cell in self.objects.cells() {
            bytes.push(match cell {
                ObjectCell::Empty => 0,
                ObjectCell::Chest => 1,
                ObjectCell::Bag => 2,
            });
        }
        for &cell in self.monsters.cells() {
            bytes.push(u8::from(cell == MonsterCell::Monster));
        }
        match &self.previous_tiles {
            Some(previous) => {
                bytes.push(1);
                push_tiles(&mut bytes, previous);
            }
            None => bytes.push(0),
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub fn to_document(&self, id_format: IdFormat) -> MapDocument {
        MapExporter::new(id_format).export(
            &self.tiles,
            &self.objects,
            &self.monsters,
            self.previous_tiles.as_ref(),
        )
    }
}

fn push_tiles(bytes: &mut Vec<u8>, tiles: &TileMap) {
    for &tile in tiles.cells() {
        let (tag, variant) = match tile {
            TileCategory::Void => (0, 0),
            TileCategory::Isolated => (1, 0),
            TileCategory::Ground(GroundVariant::Plain) => (2, 0),
            TileCategory::Ground(GroundVariant::Stone) => (3, 0),
            TileCategory::Ground(GroundVariant::Bones) => (4, 0),
            TileCategory::Wall { connector, variant } => (16 + connector as u8, variant),
        };
        bytes.push(tag);
        bytes.push(variant);
    }
}
