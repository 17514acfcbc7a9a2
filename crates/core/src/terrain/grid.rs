//! Boolean solid/empty state with the border pinned solid.

use crate::rng::{self, CaveRng};
use crate::types::{CellGrid, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: CellGrid<bool>,
}

impl Grid {
    /// Border forced solid, every interior cell solid with `wall_prob`.
    pub fn random(width: usize, height: usize, wall_prob: f64, rng: &mut CaveRng) -> Self {
        let mut grid = Self::all_solid(width, height);
        for pos in grid.interior_positions().collect::<Vec<_>>() {
            grid.set_solid(pos, rng::roll(rng, wall_prob));
        }
        grid
    }

    pub fn all_solid(width: usize, height: usize) -> Self {
        Self { cells: CellGrid::filled(width, height, true) }
    }

    /// Builds a grid from text rows, `#` solid and anything else empty.
    /// Border cells are solid whatever the rows say.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::all_solid(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid.set_solid(Pos::new(x as i32, y as i32), ch == '#');
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn cells(&self) -> &CellGrid<bool> {
        &self.cells
    }

    /// Out-of-bounds cells read as solid.
    pub fn is_solid(&self, pos: Pos) -> bool {
        self.cells.get(pos).copied().unwrap_or(true)
    }

    /// Border writes are ignored: the outer ring is always solid.
    pub fn set_solid(&mut self, pos: Pos, solid: bool) {
        if self.cells.is_interior(pos) {
            self.cells.set(pos, solid);
        }
    }

    pub fn interior_positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (width, height) = (self.width() as i32, self.height() as i32);
        (1..height - 1).flat_map(move |y| (1..width - 1).map(move |x| Pos { y, x }))
    }

    /// Solid cells among the 8 Moore neighbors, the cell itself excluded.
    pub fn solid_neighbors(&self, pos: Pos) -> u32 {
        self.solid_in_area(pos, 1) - u32::from(self.is_solid(pos))
    }

    /// Solid cells in the `(2r+1)²` square centered on `pos`, center included.
    pub fn solid_in_area(&self, pos: Pos, radius: u32) -> u32 {
        let radius = radius as i32;
        let mut count = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if self.is_solid(pos.offset(dx, dy)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// All 9 cells of the Moore block are solid.
    pub fn is_enclosed(&self, pos: Pos) -> bool {
        self.solid_in_area(pos, 1) == 9
    }

    pub fn solid_count(&self) -> usize {
        self.cells.cells().iter().filter(|&&solid| solid).count()
    }

    pub fn border_is_solid(&self) -> bool {
        self.cells.iter().all(|(pos, &solid)| solid || !self.cells.is_border(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_grid_pins_border_even_with_zero_wall_probability() {
        let mut rng = rng::seeded(1);
        let grid = Grid::random(12, 9, 0.0, &mut rng);
        assert!(grid.border_is_solid());
        assert_eq!(grid.solid_count(), 2 * 12 + 2 * 9 - 4);
    }

    #[test]
    fn border_writes_are_ignored() {
        let mut grid = Grid::all_solid(5, 5);
        grid.set_solid(Pos::new(0, 2), false);
        grid.set_solid(Pos::new(2, 2), false);
        assert!(grid.is_solid(Pos::new(0, 2)));
        assert!(!grid.is_solid(Pos::new(2, 2)));
    }

    #[test]
    fn out_of_bounds_counts_as_solid() {
        let grid = Grid::from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]);
        assert!(grid.is_solid(Pos::new(-1, -1)));
        assert_eq!(grid.solid_neighbors(Pos::new(0, 0)), 7);
        assert_eq!(grid.solid_neighbors(Pos::new(2, 2)), 0);
        assert_eq!(grid.solid_neighbors(Pos::new(1, 1)), 5);
        assert!(!grid.is_enclosed(Pos::new(0, 0)));
        assert!(Grid::all_solid(3, 3).is_enclosed(Pos::new(0, 0)));
    }

    #[test]
    fn area_count_includes_center_and_out_of_bounds() {
        let grid = Grid::from_rows(&["#####", "#...#", "#.#.#", "#...#", "#####"]);
        assert_eq!(grid.solid_in_area(Pos::new(2, 2), 1), 1);
        assert_eq!(grid.solid_in_area(Pos::new(2, 2), 2), 17);
        assert_eq!(grid.solid_in_area(Pos::new(0, 0), 2), 25 - 3);
    }
}
