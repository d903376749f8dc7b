//! CLI for sysmon, a retro text-mode dashboard for host telemetry.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

use commands::SamplingArgs;

#[derive(Parser)]
#[command(name = "sysmon")]
#[command(about = "sysmon: CPU, memory, thermal and battery telemetry at a glance")]
#[command(version = sysmon_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Live dashboard (TUI). The default when no subcommand is given.
    Dashboard {
        #[command(flatten)]
        sampling: SamplingArgs,

        /// Redraw period in milliseconds
        #[arg(long, default_value = "100")]
        frame_ms: u64,
    },

    /// Sample once, wait for a CPU measurement, and print the values
    Snapshot {
        #[command(flatten)]
        sampling: SamplingArgs,

        /// Print JSON instead of a text summary
        #[arg(long)]
        json: bool,

        /// How many process names to show (at most 5 are retained)
        #[arg(long, default_value = "5")]
        processes: usize,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        None => commands::dashboard::run(&SamplingArgs::default(), 100),
        Some(Commands::Dashboard { sampling, frame_ms }) => {
            commands::dashboard::run(&sampling, frame_ms)
        }
        Some(Commands::Snapshot {
            sampling,
            json,
            processes,
        }) => commands::snapshot::run(&sampling, json, processes),
    }
}
