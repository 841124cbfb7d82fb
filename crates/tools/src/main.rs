use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chase_core::{Cell, ChaseConfig, World};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for maze layout, spawns and adversary movement
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of ticks to simulate before printing the board
    #[arg(short, long, default_value_t = 200)]
    ticks: u64,
    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    format: Format,
}

#[derive(Serialize)]
struct Snapshot {
    seed: u64,
    tick: u64,
    height: usize,
    width: usize,
    rows: Vec<String>,
    protagonist: Cell,
    adversaries: Vec<Cell>,
    caught: bool,
    snapshot_hash: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ChaseConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => ChaseConfig::default(),
    };

    let mut world = World::new(config, args.seed).context("Failed to build world")?;
    let mut caught = false;
    for _ in 0..args.ticks {
        if let Some(id) = world.tick().caught {
            tracing::info!(tick = world.current_tick(), ?id, "protagonist caught");
            caught = true;
            break;
        }
    }

    match args.format {
        Format::Ascii => {
            for row in render_rows(&world) {
                println!("{row}");
            }
            println!("Tick: {}", world.current_tick());
            println!("Caught: {caught}");
            println!("Snapshot Hash: {}", world.snapshot_hash());
        }
        Format::Json => {
            let snapshot = Snapshot {
                seed: world.seed(),
                tick: world.current_tick(),
                height: world.grid().height(),
                width: world.grid().width(),
                rows: world.grid().to_string().lines().map(str::to_owned).collect(),
                protagonist: world.protagonist(),
                adversaries: world.adversaries().map(|(_, agent)| agent.cell()).collect(),
                caught,
                snapshot_hash: world.snapshot_hash(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?
            );
        }
    }

    Ok(())
}

fn render_rows(world: &World) -> Vec<String> {
    let mut rows: Vec<Vec<char>> =
        world.grid().to_string().lines().map(|line| line.chars().collect()).collect();
    let mut mark = |cell: Cell, glyph: char| {
        if let Some(slot) =
            rows.get_mut(cell.row as usize).and_then(|row| row.get_mut(cell.col as usize))
        {
            *slot = glyph;
        }
    };
    for (_, agent) in world.adversaries() {
        mark(agent.cell(), 'G');
    }
    mark(world.protagonist(), 'P');
    rows.into_iter().map(|row| row.into_iter().collect()).collect()
}
