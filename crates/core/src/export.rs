//! Layered tile export: the JSON document consumed by map editors and game
//! loaders.
//!
//! ```json
//! { "layers": [ { "name": "terrain", "tiles": [ { "id": "GROUND", "x": 0, "y": 0 } ] } ] }
//! ```
//!
//! Terrain layers carry one record per cell in row-major order. Object and
//! monster layers only list occupied cells.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::placement::{ChestGrid, MonsterGrid};
use crate::tiles::{TileMap, sprites};

pub const TERRAIN_LAYER: &str = "terrain";
pub const OBJECTS_LAYER: &str = "objects";
pub const MONSTERS_LAYER: &str = "monsters";
pub const PREVIOUS_TERRAIN_LAYER: &str = "previous_terrain";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    pub id: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportLayer {
    pub name: String,
    pub tiles: Vec<TileRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct MapDocument {
    pub layers: Vec<ExportLayer>,
}

impl MapDocument {
    pub fn layer(&self, name: &str) -> Option<&ExportLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes fully before touching the disk, writes `<path>.tmp`, then
    /// renames it over `path`. On failure the temp file is removed and the
    /// destination is left as it was.
    pub fn write_atomic(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| ExportError::Write { path: parent.to_path_buf(), source })?;
        }

        let tmp_path = tmp_path_for(path);
        let written = fs::write(&tmp_path, json).and_then(|()| fs::rename(&tmp_path, path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(ExportError::Write { path: path.to_path_buf(), source });
        }

        info!("wrote {} layers to {}", self.layers.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ExportError::Read { path: path.to_path_buf(), source })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// How terrain tiles are named in the export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFormat {
    /// `GROUND`, `VOID`, `WALL_LR_3`, ...
    #[default]
    Symbolic,
    /// Sprite sheet numbers as strings, e.g. `"45"`.
    Texture,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapExporter {
    pub id_format: IdFormat,
}

impl MapExporter {
    pub fn new(id_format: IdFormat) -> Self {
        Self { id_format }
    }

    pub fn export(
        &self,
        terrain: &TileMap,
        objects: &ChestGrid,
        monsters: &MonsterGrid,
        previous: Option<&TileMap>,
    ) -> MapDocument {
        let mut layers = vec![
            self.terrain_layer(TERRAIN_LAYER, terrain),
            object_layer(objects),
            monster_layer(monsters),
        ];
        if let Some(previous) = previous {
            layers.push(self.terrain_layer(PREVIOUS_TERRAIN_LAYER, previous));
        }
        MapDocument { layers }
    }

    pub fn terrain_layer(&self, name: &str, tiles: &TileMap) -> ExportLayer {
        let tiles = tiles
            .iter()
            .map(|(pos, tile)| {
                let id = match self.id_format {
                    IdFormat::Symbolic => tile.symbolic_id(),
                    IdFormat::Texture => sprites::texture_id(*tile).to_string(),
                };
                TileRecord { id, x: pos.x, y: pos.y }
            })
            .collect();
        ExportLayer { name: name.to_string(), tiles }
    }
}

pub fn object_layer(objects: &ChestGrid) -> ExportLayer {
    let tiles = objects
        .iter()
        .filter_map(|(pos, cell)| {
            cell.symbolic_id().map(|id| TileRecord { id: id.to_string(), x: pos.x, y: pos.y })
        })
        .collect();
    ExportLayer { name: OBJECTS_LAYER.to_string(), tiles }
}

pub fn monster_layer(monsters: &MonsterGrid) -> ExportLayer {
    let tiles = monsters
        .iter()
        .filter_map(|(pos, cell)| {
            cell.symbolic_id().map(|id| TileRecord { id: id.to_string(), x: pos.x, y: pos.y })
        })
        .collect();
    ExportLayer { name: MONSTERS_LAYER.to_string(), tiles }
}

/// `map.json` becomes `map.json.tmp`, so distinct destinations never share a
/// temp file.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
