//! Symbolic tile categories derived from the solid grid, including the
//! directional wall connectors used for autotiling.

pub mod classifier;
pub mod sprites;

pub use classifier::TileClassifier;

use crate::types::CellGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroundVariant {
    Plain,
    Stone,
    Bones,
}

/// Which of the four axis neighbors are walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionSet {
    pub const NONE: Self = Self { up: false, down: false, left: false, right: false };

    pub fn degree(self) -> u8 {
        u8::from(self.up) + u8::from(self.down) + u8::from(self.left) + u8::from(self.right)
    }
}

/// Wall shape named by the axis neighbors it joins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Connector {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    LeftRight,
    UpDown,
    LeftUpRight,
    LeftDownRight,
    LeftUpDown,
    UpRightDown,
    Full,
}

impl Connector {
    pub const ALL: [Connector; 15] = [
        Connector::Up,
        Connector::Down,
        Connector::Left,
        Connector::Right,
        Connector::UpLeft,
        Connector::UpRight,
        Connector::DownLeft,
        Connector::DownRight,
        Connector::LeftRight,
        Connector::UpDown,
        Connector::LeftUpRight,
        Connector::LeftDownRight,
        Connector::LeftUpDown,
        Connector::UpRightDown,
        Connector::Full,
    ];

    /// Classifies by descending degree: full, triple, opposite pair, corner
    /// pair, single. `None` for a wall with no wall neighbors.
    pub fn resolve(dirs: DirectionSet) -> Option<Connector> {
        let DirectionSet { up, down, left, right } = dirs;
        let connector = match dirs.degree() {
            4 => Connector::Full,
            3 if !down => Connector::LeftUpRight,
            3 if !up => Connector::LeftDownRight,
            3 if !right => Connector::LeftUpDown,
            3 => Connector::UpRightDown,
            2 if left && right => Connector::LeftRight,
            2 if up && down => Connector::UpDown,
            2 if up && left => Connector::UpLeft,
            2 if up => Connector::UpRight,
            2 if left => Connector::DownLeft,
            2 => Connector::DownRight,
            1 if up => Connector::Up,
            1 if down => Connector::Down,
            1 if left => Connector::Left,
            1 => Connector::Right,
            _ => return None,
        };
        Some(connector)
    }

    pub fn directions(self) -> DirectionSet {
        let (up, down, left, right) = match self {
            Connector::Up => (true, false, false, false),
            Connector::Down => (false, true, false, false),
            Connector::Left => (false, false, true, false),
            Connector::Right => (false, false, false, true),
            Connector::UpLeft => (true, false, true, false),
            Connector::UpRight => (true, false, false, true),
            Connector::DownLeft => (false, true, true, false),
            Connector::DownRight => (false, true, false, true),
            Connector::LeftRight => (false, false, true, true),
            Connector::UpDown => (true, true, false, false),
            Connector::LeftUpRight => (true, false, true, true),
            Connector::LeftDownRight => (false, true, true, true),
            Connector::LeftUpDown => (true, true, true, false),
            Connector::UpRightDown => (true, true, false, true),
            Connector::Full => (true, true, true, true),
        };
        DirectionSet { up, down, left, right }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Connector::Up => "U",
            Connector::Down => "D",
            Connector::Left => "L",
            Connector::Right => "R",
            Connector::UpLeft => "UL",
            Connector::UpRight => "UR",
            Connector::DownLeft => "DL",
            Connector::DownRight => "DR",
            Connector::LeftRight => "LR",
            Connector::UpDown => "UD",
            Connector::LeftUpRight => "LUR",
            Connector::LeftDownRight => "LDR",
            Connector::LeftUpDown => "LUD",
            Connector::UpRightDown => "URD",
            Connector::Full => "LURD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileCategory {
    /// Solid and fully enclosed by solid cells.
    Void,
    /// Solid wall with no wall axis-neighbors.
    Isolated,
    Ground(GroundVariant),
    /// `variant` indexes the connector's sprite pool and carries no meaning
    /// beyond appearance.
    Wall { connector: Connector, variant: u8 },
}

/// A tile category with the cosmetic choices stripped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Void,
    Isolated,
    Ground,
    Wall(Connector),
}

impl TileCategory {
    /// Walls are everything solid except `Void`.
    pub fn is_wall(self) -> bool {
        !matches!(self, TileCategory::Void | TileCategory::Ground(_))
    }

    pub fn is_floor(self) -> bool {
        matches!(self, TileCategory::Ground(_))
    }

    pub fn kind(self) -> TileKind {
        match self {
            TileCategory::Void => TileKind::Void,
            TileCategory::Isolated => TileKind::Isolated,
            TileCategory::Ground(_) => TileKind::Ground,
            TileCategory::Wall { connector, .. } => TileKind::Wall(connector),
        }
    }

    /// The connector's direction-set for walls, `None` for void and ground.
    pub fn direction_set(self) -> Option<DirectionSet> {
        match self {
            TileCategory::Isolated => Some(DirectionSet::NONE),
            TileCategory::Wall { connector, .. } => Some(connector.directions()),
            TileCategory::Void | TileCategory::Ground(_) => None,
        }
    }

    pub fn symbolic_id(self) -> String {
        match self {
            TileCategory::Void => "VOID".to_string(),
            TileCategory::Isolated => "ISOLATED".to_string(),
            TileCategory::Ground(GroundVariant::Plain) => "GROUND".to_string(),
            TileCategory::Ground(GroundVariant::Stone) => "GROUND_STONE".to_string(),
            TileCategory::Ground(GroundVariant::Bones) => "GROUND_BONES".to_string(),
            TileCategory::Wall { connector, variant } => {
                format!("WALL_{}_{variant}", connector.symbol())
            }
        }
    }
}

pub type TileMap = CellGrid<TileCategory>;

impl CellGrid<TileCategory> {
    /// Number of wall tiles; the pipeline's stability check compares this
    /// between generations.
    pub fn wall_count(&self) -> usize {
        self.cells().iter().filter(|tile| tile.is_wall()).count()
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.cells().iter().filter(|tile| tile.kind() == kind).count()
    }

    pub fn kinds(&self) -> CellGrid<TileKind> {
        self.map(|tile| tile.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_direction_sets() -> impl Iterator<Item = DirectionSet> {
        (0_u8..16).map(|bits| DirectionSet {
            up: bits & 1 != 0,
            down: bits & 2 != 0,
            left: bits & 4 != 0,
            right: bits & 8 != 0,
        })
    }

    #[test]
    fn every_non_empty_direction_set_resolves_to_its_own_connector() {
        for dirs in all_direction_sets() {
            match Connector::resolve(dirs) {
                Some(connector) => assert_eq!(connector.directions(), dirs),
                None => assert_eq!(dirs, DirectionSet::NONE),
            }
        }
    }

    #[test]
    fn connectors_cover_all_fifteen_patterns_once() {
        let resolved: Vec<Connector> =
            all_direction_sets().filter_map(Connector::resolve).collect();
        assert_eq!(resolved.len(), 15);
        for connector in Connector::ALL {
            assert_eq!(resolved.iter().filter(|&&c| c == connector).count(), 1, "{connector:?}");
        }
    }

    #[test]
    fn three_sided_labels_name_the_present_neighbors() {
        let missing_down = DirectionSet { up: true, down: false, left: true, right: true };
        assert_eq!(Connector::resolve(missing_down), Some(Connector::LeftUpRight));
        let missing_left = DirectionSet { up: true, down: true, left: false, right: true };
        assert_eq!(Connector::resolve(missing_left), Some(Connector::UpRightDown));
    }

    #[test]
    fn wall_predicate_excludes_void_and_ground() {
        assert!(!TileCategory::Void.is_wall());
        assert!(!TileCategory::Ground(GroundVariant::Bones).is_wall());
        assert!(TileCategory::Isolated.is_wall());
        assert!(TileCategory::Wall { connector: Connector::Up, variant: 2 }.is_wall());
    }

    #[test]
    fn symbolic_ids_are_stable() {
        assert_eq!(TileCategory::Ground(GroundVariant::Stone).symbolic_id(), "GROUND_STONE");
        assert_eq!(
            TileCategory::Wall { connector: Connector::LeftRight, variant: 3 }.symbolic_id(),
            "WALL_LR_3"
        );
    }
}
