use bevy::prelude::AppExit;
use clap::{Args, Parser, Subcommand};

use shared::SimulationSettings;
use shared::constants::HEADLESS_SPEEDUP;
use shared::settings::{DEFAULT_MARKER_COUNT, DEFAULT_SEED};

use crate::LaunchError;
use crate::headless::run_headless;

#[derive(Parser, Debug)]
#[command(name = "roomba")]
#[command(version = "0.1")]
#[command(about = "Roomba vacuuming simulation launcher")]
#[command(long_about = "
Roomba vacuuming simulation launcher

EXAMPLES:
    cargo run --bin launcher -- client                       # Open the arena viewer
    cargo run --bin launcher -- client --markers 30          # Viewer with more dirt markers
    cargo run --bin launcher -- client --speedup 4           # Viewer running 4x faster
    cargo run --bin launcher -- headless                     # Train sarsa without a window
    cargo run --bin launcher -- headless --frames 600        # Train for 600 frames then exit
")]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,
}

/// Arena layout flags shared by every mode.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ArenaArgs {
    #[arg(long, default_value_t = DEFAULT_MARKER_COUNT)]
    #[arg(help = "Number of markers scattered in the arena")]
    pub markers: usize,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    #[arg(help = "Seed for marker placement")]
    pub seed: u64,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Mode {
    /// Open a window on the arena
    Client {
        #[command(flatten)]
        arena: ArenaArgs,

        #[arg(long, default_value = "assets")]
        #[arg(help = "Directory the asset server loads from")]
        asset_path: String,

        #[arg(long, default_value_t = HEADLESS_SPEEDUP)]
        #[arg(help = "Virtual clock speed factor")]
        speedup: f32,
    },
    /// Run the simulation without a window and start sarsa
    Headless {
        #[command(flatten)]
        arena: ArenaArgs,

        #[arg(long)]
        #[arg(help = "Exit after this many frames")]
        frames: Option<u32>,

        #[arg(long, default_value = "info,wgpu=error,naga=warn")]
        log_filter: String,
    },
}

impl Cli {
    pub fn settings(&self) -> SimulationSettings {
        match &self.mode {
            Mode::Client {
                arena,
                asset_path,
                speedup,
            } => SimulationSettings {
                speedup: *speedup,
                seed: arena.seed,
                marker_count: arena.markers,
                asset_path: asset_path.clone(),
            },
            Mode::Headless { arena, .. } => SimulationSettings {
                seed: arena.seed,
                marker_count: arena.markers,
                ..Default::default()
            },
        }
    }
}

pub fn run() -> Result<(), LaunchError> {
    let cli = Cli::parse();
    let settings = cli.settings();

    match cli.mode {
        Mode::Client { .. } => match client::run_client(settings) {
            AppExit::Success => Ok(()),
            AppExit::Error(code) => Err(LaunchError::AppExit(code.get())),
        },
        Mode::Headless {
            frames, log_filter, ..
        } => run_headless(settings, frames, &log_filter),
    }
}
