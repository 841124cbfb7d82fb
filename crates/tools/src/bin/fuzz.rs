use std::io;

use anyhow::{Result, bail};
use chase_core::pathfinding::{find_path, reachable_open_cells};
use chase_core::random::random_index;
use chase_core::{Cell, ChaseConfig, Direction, MovementConfig, StepMode, World};
use clap::Parser;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to sweep
    #[arg(short, long, default_value_t = 64)]
    runs: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    println!(
        "Starting fuzz harness on seeds {}..{} for {} ticks each...",
        args.seed,
        args.seed.wrapping_add(args.runs),
        args.ticks
    );

    for run in 0..args.runs {
        let seed = args.seed.wrapping_add(run);
        let step_mode = if run % 2 == 0 { StepMode::FollowPlan } else { StepMode::Heading };
        let config = ChaseConfig {
            movement: MovementConfig { speed: 1.0, step_mode },
            ..ChaseConfig::default()
        };
        let mut world = World::new(config, seed)?;
        check_maze(&world, seed)?;
        check_paths(&world, seed)?;

        for _ in 0..args.ticks {
            world.tick();
            for (id, agent) in world.adversaries() {
                if !world.grid().is_passable(agent.cell()) {
                    bail!("seed={seed}: adversary {id:?} inside wall at {:?}", agent.cell());
                }
                if agent.plan().iter().any(|&cell| !world.grid().is_passable(cell)) {
                    bail!("seed={seed}: adversary {id:?} planned through a wall");
                }
            }
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

fn check_maze(world: &World, seed: u64) -> Result<()> {
    let grid = world.grid();
    let open = grid.open_cell_count();
    let reached = reachable_open_cells(grid, world.protagonist()).len();
    if reached != open {
        bail!("seed={seed}: only {reached} of {open} open cells reachable");
    }
    let pairs: usize = grid
        .open_cells()
        .map(|cell| {
            [Direction::Down, Direction::Right]
                .into_iter()
                .filter(|&direction| grid.is_passable(cell.step(direction)))
                .count()
        })
        .sum();
    if pairs + 1 != open {
        bail!("seed={seed}: {pairs} corridor links for {open} open cells, maze has a cycle");
    }
    Ok(())
}

fn check_paths(world: &World, seed: u64) -> Result<()> {
    let grid = world.grid();
    let open: Vec<Cell> = grid.open_cells().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..32 {
        let start = open[random_index(&mut rng, open.len())];
        let goal = open[random_index(&mut rng, open.len())];
        let path = find_path(grid, start, goal)?;
        let mut previous = start;
        for &cell in &path {
            if !previous.is_adjacent(cell) || !grid.is_passable(cell) {
                bail!("seed={seed}: invalid step {previous:?} -> {cell:?}");
            }
            previous = cell;
        }
        if previous != goal {
            bail!("seed={seed}: path from {start:?} ended at {previous:?}, not {goal:?}");
        }
    }
    Ok(())
}
