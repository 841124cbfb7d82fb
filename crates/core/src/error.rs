use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("cell ({}, {}) is outside the {height}x{width} grid", .cell.row, .cell.col)]
    OutOfBounds { cell: Cell, height: usize, width: usize },
    #[error("grid dimensions {height}x{width} are invalid")]
    InvalidDimensions { height: usize, width: usize },
    #[error("no path from ({}, {}) to ({}, {})", .start.row, .start.col, .goal.row, .goal.col)]
    NoPathFound { start: Cell, goal: Cell },
    #[error("requested {requested} spawn cells but only {available} are eligible")]
    NotEnoughSpawnCells { requested: usize, available: usize },
    #[error("spawn cell ({}, {}) is not an open cell", .cell.row, .cell.col)]
    SpawnCellBlocked { cell: Cell },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
