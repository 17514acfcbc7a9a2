//! Shared cell-space primitives: positions and the row-major grid container
//! every pipeline layer is stored in.

use std::ops::Index;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// Chebyshev distance, `max(|dx|, |dy|)`.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Up, down, left, right offsets in that order.
pub const AXIS_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Fixed-size W×H layer stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> CellGrid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self { width, height, cells: vec![value; width * height] }
    }
}

impl<T> CellGrid<T> {
    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), width * height, "cell count must match dimensions");
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// True for cells strictly inside the outer ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x > 0
            && pos.y > 0
            && (pos.x as usize) < self.width.saturating_sub(1)
            && (pos.y as usize) < self.height.saturating_sub(1)
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.is_interior(pos)
    }

    pub fn index_of(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| (pos.y as usize) * self.width + (pos.x as usize))
    }

    pub fn pos_of(&self, index: usize) -> Pos {
        Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 }
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.index_of(pos).map(|index| &self.cells[index])
    }

    /// Writes `value` at `pos`; out-of-bounds writes are dropped.
    pub fn set(&mut self, pos: Pos, value: T) {
        if let Some(index) = self.index_of(pos) {
            self.cells[index] = value;
        }
    }

    /// All positions in row-major scan order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<T> {
        let width = self.width;
        (0..self.width * self.height)
            .map(move |index| Pos { y: (index / width) as i32, x: (index % width) as i32 })
    }

    /// Row-major `(pos, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.cells.iter().enumerate().map(|(index, cell)| (self.pos_of(index), cell))
    }

    /// In-bounds cells of the Chebyshev disk of `radius` around `center`,
    /// row-major, center included.
    pub fn chebyshev_disk(&self, center: Pos, radius: u32) -> impl Iterator<Item = Pos> + use<T> {
        let radius = radius as i32;
        let min_x = (center.x - radius).max(0);
        let min_y = (center.y - radius).max(0);
        let max_x = (center.x + radius).min(self.width as i32 - 1);
        let max_y = (center.y + radius).min(self.height as i32 - 1);
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| Pos { y, x }))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> CellGrid<U> {
        let cells = self.cells.iter().map(f).collect();
        CellGrid { width: self.width, height: self.height, cells }
    }
}

impl<T> Index<Pos> for CellGrid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        debug_assert!(self.in_bounds(pos), "{pos:?} outside {}x{}", self.width, self.height);
        &self.cells[(pos.y as usize) * self.width + (pos.x as usize)]
    }
}
