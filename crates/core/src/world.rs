//! One game session: the generated maze, the protagonist's cell, and the
//! adversaries chasing through it. Input, scoring and rendering live outside.

use std::hash::Hasher;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;
use tracing::info;
use xxhash_rust::xxh3::Xxh3;

use crate::adversary::{AdversaryAgent, StepOutcome};
use crate::config::ChaseConfig;
use crate::error::MazeError;
use crate::grid::Grid;
use crate::mapgen::MazeGenerator;
use crate::random::mix_seed_stream;
use crate::spawn::spawn_cells;
use crate::types::{AdversaryId, Cell, Direction};

const MAZE_STREAM: u64 = 0;
const SPAWN_STREAM: u64 = 1;
const MOVEMENT_STREAM: u64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: u64,
    pub moved: usize,
    pub caught: Option<AdversaryId>,
}

pub struct World {
    seed: u64,
    tick: u64,
    config: ChaseConfig,
    grid: Grid,
    protagonist: Cell,
    adversaries: SlotMap<AdversaryId, AdversaryAgent>,
    movement_rng: ChaCha8Rng,
}

impl World {
    pub fn new(config: ChaseConfig, seed: u64) -> Result<Self, MazeError> {
        config.validate().map_err(|err| MazeError::InvalidConfig(err.to_string()))?;
        let generator = MazeGenerator::new(config.height, config.width)?;
        let mut maze_rng = ChaCha8Rng::seed_from_u64(mix_seed_stream(seed, MAZE_STREAM));
        let grid = generator.generate(&mut maze_rng);

        let protagonist = config.protagonist_start.unwrap_or_else(|| generator.origin());
        if !grid.is_passable(protagonist) {
            return Err(MazeError::SpawnCellBlocked { cell: protagonist });
        }

        let mut spawn_rng = ChaCha8Rng::seed_from_u64(mix_seed_stream(seed, SPAWN_STREAM));
        let starts = spawn_cells(
            &grid,
            protagonist,
            config.adversary_count,
            config.min_spawn_distance,
            &mut spawn_rng,
        )?;

        let mut world = Self {
            seed,
            tick: 0,
            config,
            grid,
            protagonist,
            adversaries: SlotMap::with_key(),
            movement_rng: ChaCha8Rng::seed_from_u64(mix_seed_stream(seed, MOVEMENT_STREAM)),
        };
        for cell in starts {
            world.spawn_adversary(cell)?;
        }
        info!(seed, adversaries = world.adversaries.len(), ?protagonist, "world ready");
        Ok(world)
    }

    pub fn spawn_adversary(&mut self, cell: Cell) -> Result<AdversaryId, MazeError> {
        if !self.grid.is_passable(cell) {
            return Err(MazeError::SpawnCellBlocked { cell });
        }
        let agent = AdversaryAgent::spawn(cell, self.config.movement, &mut self.movement_rng);
        Ok(self.adversaries.insert(agent))
    }

    /// Moves the protagonist one cell if the destination is open.
    pub fn move_protagonist(&mut self, direction: Direction) -> bool {
        let next = self.protagonist.step(direction);
        if !self.grid.is_passable(next) {
            return false;
        }
        self.protagonist = next;
        true
    }

    /// Advances every adversary once, then checks for a catch.
    pub fn tick(&mut self) -> TickSummary {
        self.tick += 1;
        let mut moved = 0;
        for agent in self.adversaries.values_mut() {
            if matches!(agent.tick(&self.grid, &mut self.movement_rng), StepOutcome::Moved { .. }) {
                moved += 1;
            }
        }
        TickSummary { tick: self.tick, moved, caught: self.caught_by() }
    }

    pub fn caught_by(&self) -> Option<AdversaryId> {
        self.adversaries
            .iter()
            .find(|(_, agent)| agent.cell() == self.protagonist)
            .map(|(id, _)| id)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn protagonist(&self) -> Cell {
        self.protagonist
    }

    pub fn adversary(&self, id: AdversaryId) -> Option<&AdversaryAgent> {
        self.adversaries.get(id)
    }

    pub fn adversaries(&self) -> impl Iterator<Item = (AdversaryId, &AdversaryAgent)> + '_ {
        self.adversaries.iter()
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u64(self.grid.fingerprint());
        hasher.write_i32(self.protagonist.row);
        hasher.write_i32(self.protagonist.col);
        for agent in self.adversaries.values() {
            hasher.write_i32(agent.cell().row);
            hasher.write_i32(agent.cell().col);
            hasher.write_u8(agent.direction().code());
            hasher.write_usize(agent.plan().len());
        }
        hasher.finish()
    }
}
