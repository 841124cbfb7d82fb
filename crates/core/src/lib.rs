pub mod adversary;
pub mod config;
pub mod error;
pub mod grid;
pub mod mapgen;
pub mod pathfinding;
pub mod random;
pub mod spawn;
pub mod types;
pub mod world;

pub use adversary::{AdversaryAgent, StepOutcome};
pub use config::{ChaseConfig, MovementConfig, StepMode};
pub use error::{ConfigError, MazeError};
pub use grid::Grid;
pub use mapgen::{MazeGenerator, generate_maze};
pub use pathfinding::find_path;
pub use types::*;
pub use world::{TickSummary, World};
