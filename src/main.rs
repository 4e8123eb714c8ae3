//! Asteroid Drift headless runner
//!
//! Plays a seeded session with the built-in autopilot and prints the run
//! metrics as JSON. `RUST_LOG=info` shows wave and life events.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use asteroid_drift::Tuning;
use asteroid_drift::runner::{AimPilot, IdlePilot, Pilot, run_session};

#[derive(Parser, Debug)]
#[command(name = "asteroid-drift")]
#[command(about = "Run a seeded Asteroids session headless and report the outcome")]
struct Args {
    /// Session seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Maximum frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// JSON tuning file; missing fields take defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Leave the ship idle instead of flying the autopilot
    #[arg(long)]
    idle: bool,

    /// Print the effective tuning as JSON and exit
    #[arg(long)]
    dump_tuning: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    if args.dump_tuning {
        println!("{}", tuning.to_json_pretty()?);
        return Ok(());
    }

    log::info!(
        "Asteroid Drift starting: seed {} frames {} @ {} fps",
        args.seed,
        args.frames,
        args.fps
    );

    let mut aim = AimPilot::default();
    let mut idle = IdlePilot;
    let pilot: &mut dyn Pilot = if args.idle { &mut idle } else { &mut aim };

    let metrics = run_session(args.seed, tuning, args.frames, args.fps, pilot)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&metrics).context("failed to encode run metrics")?
    );
    Ok(())
}
