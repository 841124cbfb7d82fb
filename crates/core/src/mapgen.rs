//! Procedural maze generation.

mod generator;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

pub use generator::MazeGenerator;

use crate::error::MazeError;
use crate::grid::Grid;

/// Reference board size.
pub const DEFAULT_HEIGHT: usize = 31;
pub const DEFAULT_WIDTH: usize = 28;

pub fn generate_maze(height: usize, width: usize, seed: u64) -> Result<Grid, MazeError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(MazeGenerator::new(height, width)?.generate(&mut rng))
}
