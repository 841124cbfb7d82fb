//! Randomized depth-first carve over a step-2 lattice.

use rand_chacha::rand_core::Rng;
use tracing::{debug, info};

use crate::error::MazeError;
use crate::grid::Grid;
use crate::random::random_index;
use crate::types::Cell;

const LATTICE_STEP: i32 = 2;

pub struct MazeGenerator {
    height: usize,
    width: usize,
}

impl MazeGenerator {
    pub fn new(height: usize, width: usize) -> Result<Self, MazeError> {
        if height == 0 || width == 0 || height > i32::MAX as usize || width > i32::MAX as usize {
            return Err(MazeError::InvalidDimensions { height, width });
        }
        Ok(Self { height, width })
    }

    /// Lattice point nearest the board centre; always open after generation.
    pub fn origin(&self) -> Cell {
        Cell::new((self.height / 2) as i32, (self.width / 2) as i32)
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut grid = Grid::blocked(self.height, self.width);
        let origin = self.origin();
        open(&mut grid, origin);

        let mut stack = vec![origin];
        let mut carve_steps = 0_usize;
        while let Some(&current) = stack.last() {
            let unvisited = unvisited_lattice_neighbors(&grid, current);
            if unvisited.is_empty() {
                stack.pop();
                continue;
            }
            let next = unvisited[random_index(rng, unvisited.len())];
            open(&mut grid, next);
            open(&mut grid, midpoint(current, next));
            stack.push(next);
            carve_steps += 1;
        }

        debug_assert_eq!(grid.open_cell_count(), 2 * carve_steps + 1);
        debug!(carve_steps, "maze carve finished");
        info!(
            height = self.height,
            width = self.width,
            open_cells = grid.open_cell_count(),
            "generated maze"
        );
        grid
    }
}

fn unvisited_lattice_neighbors(grid: &Grid, cell: Cell) -> Vec<Cell> {
    [
        Cell::new(cell.row + LATTICE_STEP, cell.col),
        Cell::new(cell.row - LATTICE_STEP, cell.col),
        Cell::new(cell.row, cell.col + LATTICE_STEP),
        Cell::new(cell.row, cell.col - LATTICE_STEP),
    ]
    .into_iter()
    .filter(|&next| grid.is_open(next) == Ok(false))
    .collect()
}

fn midpoint(a: Cell, b: Cell) -> Cell {
    Cell::new((a.row + b.row) / 2, (a.col + b.col) / 2)
}

// Carved cells come from bounds-checked lattice neighbours.
fn open(grid: &mut Grid, cell: Cell) {
    let carved = grid.set_open(cell, true);
    debug_assert!(carved.is_ok(), "carve target {cell:?} must be in bounds");
}
