//! Developer harness: run one engine decision from the command line
//!
//! ```text
//! tempo --fen "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1" --time-ms 30000
//! RUST_LOG=tempo_engine=debug tempo --moves e2e4 e7e5 --seed 7
//! ```
//!
//! Prints the chosen move and the search report. This is not a protocol
//! front end; it exists to exercise the engine by hand.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tempo_engine::{Engine, EngineConfig, Jitter, ShakmatyBoard, TimeBudget};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to search (defaults to the initial position)
    #[arg(long)]
    fen: Option<String>,

    /// Coordinate moves to play from the position before searching
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Time remaining on the engine's clock, in milliseconds
    #[arg(long, default_value_t = 60_000)]
    time_ms: u64,

    /// JSON engine configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the evaluation jitter for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Override the maximum search depth
    #[arg(long)]
    depth: Option<u32>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.eval.jitter = Jitter::Seeded(seed);
    }
    if let Some(depth) = args.depth {
        config.search.max_depth = depth;
    }

    if args.dump_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let mut board = match &args.fen {
        Some(fen) => ShakmatyBoard::from_fen(fen)?,
        None => ShakmatyBoard::new(),
    };
    for mv in &args.moves {
        board
            .play_coordinate(mv)
            .with_context(|| format!("playing {mv}"))?;
    }

    let mut engine = Engine::new(config)?;
    info!("[HARNESS] Thinking with {}ms on the clock", args.time_ms);
    let report = engine.think(&mut board, TimeBudget::from_millis(args.time_ms))?;

    println!("{}", report.best_move);
    println!("{report}");
    Ok(())
}
