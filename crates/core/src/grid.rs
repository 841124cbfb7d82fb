//! Cell passability storage shared by generation, search, and movement.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::error::MazeError;
use crate::types::Cell;

pub const WALL_GLYPH: char = '#';
pub const OPEN_GLYPH: char = '.';

/// Fixed-size boolean passability matrix, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    open: Vec<bool>,
}

impl Grid {
    /// All cells blocked.
    pub fn blocked(height: usize, width: usize) -> Self {
        Self { height, width, open: vec![false; height * width] }
    }

    /// Parses `#` as wall and `.` as open. Rows must share one width.
    pub fn from_rows(rows: &[&str]) -> Result<Self, MazeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if height == 0 || width == 0 || rows.iter().any(|row| row.chars().count() != width) {
            return Err(MazeError::InvalidDimensions { height, width });
        }
        let open = rows.iter().flat_map(|row| row.chars().map(|glyph| glyph != WALL_GLYPH)).collect();
        Ok(Self { height, width, open })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    pub fn is_open(&self, cell: Cell) -> Result<bool, MazeError> {
        self.index(cell).map(|idx| self.open[idx])
    }

    /// In bounds and open.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.index(cell).is_ok_and(|idx| self.open[idx])
    }

    pub fn set_open(&mut self, cell: Cell, open: bool) -> Result<(), MazeError> {
        let idx = self.index(cell)?;
        self.open[idx] = open;
        Ok(())
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| Cell::new(row as i32, col as i32)))
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|&cell| self.is_passable(cell))
    }

    pub fn open_cell_count(&self) -> usize {
        self.open.iter().filter(|&&open| open).count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.open.len());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend(self.open.iter().map(|&open| u8::from(open)));
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    fn index(&self, cell: Cell) -> Result<usize, MazeError> {
        if !self.is_in_bounds(cell) {
            return Err(MazeError::OutOfBounds { cell, height: self.height, width: self.width });
        }
        Ok((cell.row as usize) * self.width + (cell.col as usize))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.open.chunks(self.width.max(1)) {
            for &open in row {
                write!(f, "{}", if open { OPEN_GLYPH } else { WALL_GLYPH })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
