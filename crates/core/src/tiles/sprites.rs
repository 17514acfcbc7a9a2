//! Lookup from tile categories to the cave sprite sheet's texture numbers.
//!
//! The pipeline never stores these numbers. They matter in two places: the
//! pool sizes decide how many cosmetic variants a connector has, and the
//! exporter can emit them in place of symbolic ids.

use crate::tiles::{Connector, GroundVariant, TileCategory};

pub const GROUND: u16 = 45;
pub const GROUND_STONE: u16 = 107;
pub const GROUND_BONES: u16 = 109;
pub const VOID: u16 = 30;
pub const ISOLATED: u16 = 11;

const UP: &[u16] = &[24, 49, 65, 101];
const DOWN: &[u16] = &[13, 9, 79, 80, 81];
const LEFT: &[u16] = &[28, 53, 75, 89, 93, 99];
const RIGHT: &[u16] = &[26, 51, 86, 91, 97];
const LEFT_RIGHT: &[u16] = &[4, 5, 6, 59, 60, 77, 98];
const UP_DOWN: &[u16] = &[19, 23, 33, 37, 44, 48];

/// Interchangeable sprites for a connector. Never empty.
pub fn pool(connector: Connector) -> &'static [u16] {
    match connector {
        Connector::Up => UP,
        Connector::Down => DOWN,
        Connector::Left => LEFT,
        Connector::Right => RIGHT,
        Connector::LeftRight => LEFT_RIGHT,
        Connector::UpDown => UP_DOWN,
        Connector::UpRight => &[57],
        Connector::UpLeft => &[61],
        Connector::DownRight => &[3],
        Connector::DownLeft => &[7],
        Connector::LeftUpRight => &[27],
        Connector::LeftDownRight => &[52],
        Connector::LeftUpDown => &[87],
        Connector::UpRightDown => &[88],
        Connector::Full => &[92],
    }
}

pub fn variant_count(connector: Connector) -> u8 {
    pool(connector).len() as u8
}

pub fn texture_id(tile: TileCategory) -> u16 {
    match tile {
        TileCategory::Void => VOID,
        TileCategory::Isolated => ISOLATED,
        TileCategory::Ground(GroundVariant::Plain) => GROUND,
        TileCategory::Ground(GroundVariant::Stone) => GROUND_STONE,
        TileCategory::Ground(GroundVariant::Bones) => GROUND_BONES,
        TileCategory::Wall { connector, variant } => {
            let sprites = pool(connector);
            sprites[usize::from(variant) % sprites.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn every_connector_has_at_least_one_sprite() {
        for connector in Connector::ALL {
            assert!(variant_count(connector) >= 1, "{connector:?} has an empty pool");
        }
    }

    #[test]
    fn sprite_numbers_are_not_shared_between_categories() {
        let mut seen = BTreeSet::from([GROUND, GROUND_STONE, GROUND_BONES, VOID, ISOLATED]);
        for connector in Connector::ALL {
            for &sprite in pool(connector) {
                assert!(seen.insert(sprite), "sprite {sprite} reused by {connector:?}");
            }
        }
    }

    #[test]
    fn texture_id_picks_from_the_variant_pool() {
        let tile = TileCategory::Wall { connector: Connector::Left, variant: 5 };
        assert_eq!(texture_id(tile), 99);
        assert_eq!(texture_id(TileCategory::Wall { connector: Connector::Full, variant: 0 }), 92);
        assert_eq!(texture_id(TileCategory::Ground(GroundVariant::Bones)), 109);
    }
}
