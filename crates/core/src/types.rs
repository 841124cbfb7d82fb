use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct AdversaryId;
}

/// A (row, column) coordinate in the maze. Ordered row-then-column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Cell {
        let (d_row, d_col) = direction.delta();
        Cell { row: self.row + d_row, col: self.col + d_col }
    }

    pub fn neighbors(self) -> [Cell; 4] {
        Direction::ALL.map(|direction| self.step(direction))
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    pub fn distance_squared(self, other: Cell) -> i64 {
        let d_row = i64::from(self.row - other.row);
        let d_col = i64::from(self.col - other.col);
        d_row * d_row + d_col * d_col
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(d_row, d_col)` for one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&direction| from.step(direction) == to)
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_between_inverts_step() {
        let origin = Cell::new(4, 7);
        for direction in Direction::ALL {
            assert_eq!(Direction::between(origin, origin.step(direction)), Some(direction));
        }
        assert_eq!(Direction::between(origin, Cell::new(5, 8)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn cells_order_by_row_then_column() {
        assert!(Cell::new(1, 9) < Cell::new(2, 0));
        assert!(Cell::new(2, 0) < Cell::new(2, 1));
    }
}
