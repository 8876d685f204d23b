//! Headless runner for the heart field.
//!
//! Loads a configuration, animates the hearts at the configured frame rate,
//! reads click/start/stop/quit commands from stdin and writes one render
//! frame per tick through the configured transport. Logs go to stderr.

mod app;
mod input;
mod stats;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use heartburst_config::{load_config, ConfigError};
use heartburst_simulation::SimulationError;
use heartburst_transport::{TransportController, TransportError};
use log::{error, info};
use thiserror::Error;

use crate::app::App;
use crate::input::{spawn_stdin_reader, InputEvent};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration file (JSON, or TOML by extension)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Stop after this many ticks
    #[arg(long)]
    frames: Option<u64>,

    /// Override the RNG seed from the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Include hitboxes and canvas info in every frame
    #[arg(long)]
    debug_overlay: bool,
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Failed to set up tick statistics: {0}")]
    Stats(String),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Failed to start input reader: {0}")]
    Input(#[from] std::io::Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), RunnerError> {
    info!("Loading configuration from {}", args.config.display());
    let mut config = load_config(&args.config)?;

    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if args.debug_overlay {
        config.simulation.debug_overlay = true;
    }

    let transport = TransportController::from_config(&config.transport)?;
    let mut app = App::new(&config, transport, args.frames)?;

    let (events_tx, events_rx) = crossbeam_channel::unbounded();

    let quit_tx = events_tx.clone();
    ctrlc::set_handler(move || {
        let _ = quit_tx.send(InputEvent::Quit);
    })?;

    spawn_stdin_reader(events_tx)?;

    info!(
        "Animating {} hearts at {} fps on a {}x{} canvas",
        config.simulation.particle_count,
        config.simulation.frame_rate,
        config.simulation.canvas_width,
        config.simulation.canvas_height
    );
    app.run(events_rx)
}
