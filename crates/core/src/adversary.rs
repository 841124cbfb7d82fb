//! Adversary movement: random-target re-planning with a stochastic speed gate
//! and a local wander fallback when the way ahead is blocked.

use std::collections::VecDeque;

use rand_chacha::rand_core::Rng;
use tracing::{debug, trace};

use crate::config::{MovementConfig, StepMode};
use crate::grid::Grid;
use crate::pathfinding::find_path;
use crate::random::{chance, choose, random_index, shuffle};
use crate::types::{Cell, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The speed gate did not fire this tick.
    Idle,
    Moved { from: Cell, to: Cell },
    /// Acted but every neighbour is a wall.
    Stuck,
}

#[derive(Clone, Debug)]
pub struct AdversaryAgent {
    cell: Cell,
    direction: Direction,
    plan: VecDeque<Cell>,
    target: Option<Cell>,
    movement: MovementConfig,
}

impl AdversaryAgent {
    pub fn spawn<R: Rng + ?Sized>(cell: Cell, movement: MovementConfig, rng: &mut R) -> Self {
        let direction = random_direction(rng);
        Self { cell, direction, plan: VecDeque::new(), target: None, movement }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Remaining planned cells, nearest first.
    pub fn plan(&self) -> &VecDeque<Cell> {
        &self.plan
    }

    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> StepOutcome {
        if !chance(rng, self.movement.speed) {
            return StepOutcome::Idle;
        }
        if self.needs_plan() {
            self.replan(grid, rng);
        }

        let from = self.cell;
        if self.movement.step_mode == StepMode::FollowPlan && self.follow_plan(grid) {
            trace!(?from, to = ?self.cell, "adversary followed plan");
            return StepOutcome::Moved { from, to: self.cell };
        }
        if self.movement.step_mode == StepMode::FollowPlan {
            // Leaving the path makes the remaining plan unreachable in single steps.
            self.plan.clear();
        }

        match self.wander(grid, rng) {
            Some(to) => {
                trace!(?from, ?to, direction = ?self.direction, "adversary wandered");
                StepOutcome::Moved { from, to }
            }
            None => {
                debug!(cell = ?self.cell, "adversary is enclosed");
                StepOutcome::Stuck
            }
        }
    }

    fn needs_plan(&self) -> bool {
        match self.movement.step_mode {
            StepMode::FollowPlan => self.plan.is_empty(),
            StepMode::Heading => self.plan.back().is_none_or(|&last| last == self.cell),
        }
    }

    fn replan<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        let target = Cell::new(
            random_index(rng, grid.height()) as i32,
            random_index(rng, grid.width()) as i32,
        );
        self.direction = random_direction(rng);
        self.target = Some(target);
        self.plan = match find_path(grid, self.cell, target) {
            Ok(path) => {
                debug!(from = ?self.cell, ?target, len = path.len(), "adversary planned path");
                path.into()
            }
            Err(err) => {
                debug!(%err, "adversary adopted an empty plan");
                VecDeque::new()
            }
        };
    }

    fn follow_plan(&mut self, grid: &Grid) -> bool {
        let Some(&next) = self.plan.front() else {
            return false;
        };
        let Some(direction) = Direction::between(self.cell, next) else {
            return false;
        };
        if !grid.is_passable(next) {
            return false;
        }
        self.plan.pop_front();
        self.cell = next;
        self.direction = direction;
        true
    }

    fn wander<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Option<Cell> {
        let ahead = self.cell.step(self.direction);
        if grid.is_passable(ahead) {
            self.cell = ahead;
            return Some(ahead);
        }

        let mut directions = Direction::ALL;
        shuffle(rng, &mut directions);
        let direction =
            directions.into_iter().find(|&direction| grid.is_passable(self.cell.step(direction)))?;
        self.direction = direction;
        self.cell = self.cell.step(direction);
        Some(self.cell)
    }
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    choose(rng, &Direction::ALL).copied().unwrap_or(Direction::Up)
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::mapgen::generate_maze;

    fn always(step_mode: StepMode) -> MovementConfig {
        MovementConfig { speed: 1.0, step_mode }
    }

    #[test]
    fn zero_speed_never_acts() {
        let grid = generate_maze(11, 11, 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let start = Cell::new(5, 5);
        let mut agent =
            AdversaryAgent::spawn(start, MovementConfig { speed: 0.0, ..Default::default() }, &mut rng);
        for _ in 0..500 {
            assert_eq!(agent.tick(&grid, &mut rng), StepOutcome::Idle);
        }
        assert_eq!(agent.cell(), start);
        assert!(agent.plan().is_empty());
        assert_eq!(agent.target(), None);
    }

    #[test]
    fn reference_speed_acts_on_a_fraction_of_ticks() {
        let grid = generate_maze(31, 28, 8).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut agent = AdversaryAgent::spawn(Cell::new(15, 14), MovementConfig::default(), &mut rng);
        let acted = (0..10_000)
            .filter(|_| agent.tick(&grid, &mut rng) != StepOutcome::Idle)
            .count();
        assert!((300..=700).contains(&acted), "acted on {acted} of 10000 ticks");
    }

    #[test]
    fn follow_plan_walks_every_planned_cell_in_order() {
        let grid = generate_maze(31, 28, 21).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut agent =
            AdversaryAgent::spawn(Cell::new(15, 14), always(StepMode::FollowPlan), &mut rng);

        for _ in 0..200 {
            let expected_next = agent.plan().front().copied();
            let had_plan = expected_next.is_some();
            let outcome = agent.tick(&grid, &mut rng);
            let StepOutcome::Moved { from, to } = outcome else {
                panic!("open maze cell should always have an exit, got {outcome:?}");
            };
            assert!(from.is_adjacent(to));
            assert!(grid.is_passable(to));
            if had_plan {
                assert_eq!(Some(to), expected_next);
            }
            assert!(agent.plan().iter().all(|&cell| grid.is_passable(cell)));
        }
    }

    #[test]
    fn reaching_the_goal_triggers_a_fresh_plan() {
        let grid = Grid::from_rows(&["......", "......", "......"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut agent = AdversaryAgent::spawn(Cell::new(1, 1), always(StepMode::FollowPlan), &mut rng);
        let mut targets = Vec::new();
        for _ in 0..100 {
            let had_plan = !agent.plan().is_empty();
            let target_before = agent.target();
            agent.tick(&grid, &mut rng);
            if had_plan && agent.plan().is_empty() {
                assert_eq!(Some(agent.cell()), target_before);
            }
            targets.extend(agent.target());
        }
        targets.dedup();
        assert!(targets.len() > 3, "expected several distinct plans, got {targets:?}");
    }

    #[test]
    fn enclosed_agent_stays_in_place() {
        let grid = Grid::from_rows(&["###", "#.#", "###"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for step_mode in [StepMode::FollowPlan, StepMode::Heading] {
            let mut agent = AdversaryAgent::spawn(Cell::new(1, 1), always(step_mode), &mut rng);
            for _ in 0..50 {
                assert_eq!(agent.tick(&grid, &mut rng), StepOutcome::Stuck);
            }
            assert_eq!(agent.cell(), Cell::new(1, 1));
        }
    }

    #[test]
    fn dead_end_wander_turns_toward_the_only_exit() {
        let grid = Grid::from_rows(&["#####", "#..##", "#####"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut agent = AdversaryAgent::spawn(Cell::new(1, 2), always(StepMode::Heading), &mut rng);
        let outcome = agent.tick(&grid, &mut rng);
        assert_eq!(outcome, StepOutcome::Moved { from: Cell::new(1, 2), to: Cell::new(1, 1) });
        assert_eq!(agent.direction(), Direction::Left);
    }

    #[test]
    fn heading_mode_keeps_plan_without_consuming_it() {
        let grid = generate_maze(31, 28, 13).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut agent = AdversaryAgent::spawn(Cell::new(15, 14), always(StepMode::Heading), &mut rng);
        for _ in 0..300 {
            let plan_before = agent.plan().clone();
            let keeps_plan = plan_before.back().is_some_and(|&last| last != agent.cell());
            let outcome = agent.tick(&grid, &mut rng);
            assert!(matches!(outcome, StepOutcome::Moved { .. }));
            assert!(grid.is_passable(agent.cell()));
            if keeps_plan {
                assert_eq!(agent.plan(), &plan_before);
            }
        }
    }

    #[test]
    fn heading_mode_replans_once_standing_on_the_last_planned_cell() {
        let grid = Grid::from_rows(&["......", "......", "......"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut agent = AdversaryAgent::spawn(Cell::new(1, 2), always(StepMode::Heading), &mut rng);
        agent.plan = VecDeque::from([Cell::new(1, 1), Cell::new(1, 2)]);
        let stale_plan = agent.plan.clone();
        assert_eq!(agent.target(), None);

        agent.tick(&grid, &mut rng);

        assert_ne!(agent.plan(), &stale_plan);
        let target = agent.target().expect("re-plan draws a target");
        assert!(grid.is_in_bounds(target));
        assert_eq!(agent.plan().back().copied().unwrap_or(Cell::new(1, 2)), target);
    }

    #[test]
    fn identical_seeds_replay_identical_trajectories() {
        let grid = generate_maze(31, 28, 55).unwrap();
        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut agent =
                AdversaryAgent::spawn(Cell::new(15, 14), always(StepMode::FollowPlan), &mut rng);
            (0..400).map(|_| agent.tick(&grid, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }
}
