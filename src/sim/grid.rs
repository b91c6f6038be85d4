//! Bordered cell grid
//!
//! Interior cells span `0..columns` x `0..rows`. One extra ring of `Border`
//! cells surrounds them at `-1` and `columns`/`rows`. Storage is a flat
//! row-major `Vec` offset by one so the ring has real indices; the ring is
//! written once in `Grid::new` and no method writes to it afterwards.

use std::ops::Index;

use glam::IVec2;

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Destructible block; `color` indexes the block palette
    Block { color: u8 },
    /// Permanent sentinel on the outer ring
    Border,
}

impl Cell {
    /// True for anything the ball bounces off
    #[inline]
    pub fn is_solid(&self) -> bool {
        !matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn is_destructible(&self) -> bool {
        matches!(self, Cell::Block { .. })
    }
}

/// Fixed-size arena of cells including the border ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: i32,
    rows: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Empty interior surrounded by a border ring
    pub fn new(columns: i32, rows: i32) -> Self {
        assert!(columns > 0 && rows > 0, "grid must have a non-empty interior");
        let stride = (columns + 2) as usize;
        let height = (rows + 2) as usize;
        let mut grid = Self {
            columns,
            rows,
            cells: vec![Cell::Empty; stride * height],
        };
        for i in 0..grid.cells.len() {
            let pos = grid.coords(i);
            if grid.is_border_coord(pos) {
                grid.cells[i] = Cell::Border;
            }
        }
        grid
    }

    // === Dimensions ===
    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    // === Index conversion ===
    #[inline]
    fn stride(&self) -> i32 {
        self.columns + 2
    }

    /// Flat index for a coordinate in the bordered range
    #[inline]
    pub fn offset(&self, pos: IVec2) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(((pos.y + 1) * self.stride() + pos.x + 1) as usize)
        } else {
            None
        }
    }

    #[inline]
    fn coords(&self, index: usize) -> IVec2 {
        let i = index as i32;
        IVec2::new(i % self.stride() - 1, i / self.stride() - 1)
    }

    // === Bounds checking ===
    /// Inside the bordered range (interior plus ring)
    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= -1 && pos.x <= self.columns && pos.y >= -1 && pos.y <= self.rows
    }

    #[inline]
    pub fn is_interior(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.columns && pos.y >= 0 && pos.y < self.rows
    }

    #[inline]
    pub fn is_border_coord(&self, pos: IVec2) -> bool {
        self.in_bounds(pos) && !self.is_interior(pos)
    }

    // === Access ===
    pub fn get(&self, pos: IVec2) -> Option<Cell> {
        self.offset(pos).map(|i| self.cells[i])
    }

    /// Place a destructible block. Returns false (and does nothing) outside
    /// the interior.
    pub fn set_block(&mut self, pos: IVec2, color: u8) -> bool {
        if !self.is_interior(pos) {
            return false;
        }
        if let Some(i) = self.offset(pos) {
            self.cells[i] = Cell::Block { color };
            return true;
        }
        false
    }

    /// Clear a destructible block, returning what was removed. Border and
    /// empty cells are left untouched.
    pub fn remove_block(&mut self, pos: IVec2) -> Option<Cell> {
        let i = self.offset(pos)?;
        let cell = self.cells[i];
        if cell.is_destructible() {
            self.cells[i] = Cell::Empty;
            Some(cell)
        } else {
            None
        }
    }

    /// Every coordinate in the bordered range with its content, row by row
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.coords(i), *cell))
    }

    /// Interior blocks only
    pub fn blocks(&self) -> impl Iterator<Item = (IVec2, u8)> + '_ {
        self.iter().filter_map(|(pos, cell)| match cell {
            Cell::Block { color } => Some((pos, color)),
            _ => None,
        })
    }

    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_destructible()).count()
    }

    /// True when every ring coordinate still holds `Border`
    pub fn border_intact(&self) -> bool {
        self.iter()
            .filter(|(pos, _)| self.is_border_coord(*pos))
            .all(|(_, cell)| cell == Cell::Border)
    }
}

impl Index<IVec2> for Grid {
    type Output = Cell;

    /// Panics outside the bordered range; lookahead never leaves it
    fn index(&self, pos: IVec2) -> &Cell {
        match self.offset(pos) {
            Some(i) => &self.cells[i],
            None => panic!(
                "cell {pos} outside bordered {}x{} grid",
                self.columns, self.rows
            ),
        }
    }
}
