//! Deterministic shortest-path search over open maze cells.
//! It does not own any movement policy; adversaries decide when to ask for a path.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::MazeError;
use crate::grid::Grid;
use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    row: i32,
    col: i32,
}

/// A* from `start` to `goal` with the Manhattan heuristic and unit step cost.
///
/// The returned path excludes `start` and ends at `goal`, so its length is the
/// number of moves; `start == goal` yields an empty path. Frontier ties break on
/// lower `f`, then lower `h`, then row, then column.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Result<Vec<Cell>, MazeError> {
    if !grid.is_in_bounds(start) || !grid.is_passable(goal) {
        return Err(MazeError::NoPathFound { start, goal });
    }
    if start == goal {
        return Ok(vec![]);
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, row: start.row, col: start.col });
    g_score.insert(start, 0_u32);

    while let Some(current) = open_set.pop_first() {
        let cell = Cell::new(current.row, current.col);
        if cell == goal {
            return Ok(reconstruct_path(&came_from, start, goal));
        }
        let Some(&current_g) = g_score.get(&cell) else {
            continue;
        };
        if current.f > current_g + current.h {
            // Superseded entry; a cheaper one for this cell was queued later.
            continue;
        }
        for next in cell.neighbors() {
            if !grid.is_passable(next) {
                continue;
            }
            let tentative = current_g + 1;
            if tentative < *g_score.get(&next).unwrap_or(&u32::MAX) {
                came_from.insert(next, cell);
                g_score.insert(next, tentative);
                let h = manhattan(next, goal);
                open_set.insert(OpenNode { f: tentative + h, h, row: next.row, col: next.col });
            }
        }
    }

    Err(MazeError::NoPathFound { start, goal })
}

fn reconstruct_path(came_from: &BTreeMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut cell = goal;
    while let Some(&previous) = came_from.get(&cell) {
        if previous == start {
            break;
        }
        path.push(previous);
        cell = previous;
    }
    path.reverse();
    path
}

/// Flood fill over passable cells.
pub fn reachable_open_cells(grid: &Grid, start: Cell) -> BTreeSet<Cell> {
    let mut visited = BTreeSet::new();
    if !grid.is_passable(start) {
        return visited;
    }

    let mut queue = VecDeque::from([start]);
    visited.insert(start);
    while let Some(current) = queue.pop_front() {
        for next in current.neighbors() {
            if grid.is_passable(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

pub fn manhattan(a: Cell, b: Cell) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}
