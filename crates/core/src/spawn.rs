//! Adversary start placement away from the protagonist.

use rand_chacha::rand_core::Rng;

use crate::error::MazeError;
use crate::grid::Grid;
use crate::random::random_index;
use crate::types::Cell;

/// Picks `count` distinct open cells at Euclidean distance `>= min_distance`
/// from `protagonist`, uniformly without replacement. A negative or NaN
/// minimum excludes nothing.
pub fn spawn_cells<R: Rng + ?Sized>(
    grid: &Grid,
    protagonist: Cell,
    count: usize,
    min_distance: f64,
    rng: &mut R,
) -> Result<Vec<Cell>, MazeError> {
    let min_distance = min_distance.max(0.0);
    let min_squared = min_distance * min_distance;
    let mut candidates: Vec<Cell> = grid
        .open_cells()
        .filter(|&cell| cell.distance_squared(protagonist) as f64 >= min_squared)
        .collect();
    if candidates.len() < count {
        return Err(MazeError::NotEnoughSpawnCells {
            requested: count,
            available: candidates.len(),
        });
    }

    for picked in 0..count {
        let swap_with = picked + random_index(rng, candidates.len() - picked);
        candidates.swap(picked, swap_with);
    }
    candidates.truncate(count);
    Ok(candidates)
}
