use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use mason::{InputState, Session, SimConfig};
use mason_world::{Grid, Volume};

#[derive(Parser, Debug)]
#[command(about = "Headless voxel sandbox session")]
struct Args {
    /// JSON map volume ([x][z][y] nested arrays) to load instead of
    /// generating a flat world.
    #[arg(long)]
    map: Option<PathBuf>,

    /// TOML tuning overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generated world size when no map is given.
    #[arg(long, default_value_t = 16)]
    width: usize,
    #[arg(long, default_value_t = 16)]
    depth: usize,
    #[arg(long, default_value_t = 8)]
    height: usize,

    /// Simulation ticks to run at 60 Hz.
    #[arg(long, default_value_t = 240)]
    ticks: u32,

    /// Start in walking mode (gravity on) instead of free-fly.
    #[arg(long)]
    walk: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };

    let grid = match &args.map {
        Some(path) => {
            let volume: Volume = serde_json::from_str(&fs::read_to_string(path)?)?;
            let mut grid = Grid::new();
            grid.load(&volume);
            grid
        }
        None => Grid::generate(args.width, args.depth, args.height),
    };
    log::info!(
        "world {}x{}x{} with {} blocks",
        grid.width(),
        grid.depth(),
        grid.height(),
        grid.blocks().count()
    );

    let (mut session, _tx) = Session::offline(cfg, grid);
    if args.walk {
        session.walker.toggle_free_fly();
    }

    let dt = 1.0 / 60.0;
    let input = InputState::default();
    for _ in 0..args.ticks {
        session.step(dt, &input);
    }

    let sent = session.take_outgoing().len();
    let pos = session.walker.pos;
    println!(
        "tick {}: pos=({:.2}, {:.2}, {:.2}) grounded_jump={} intents={}",
        session.tick, pos.x, pos.y, pos.z, session.walker.has_jump, sent
    );
    Ok(())
}
