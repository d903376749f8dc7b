pub mod dashboard;
pub mod snapshot;

use std::path::PathBuf;

use clap::Args;
use sysmon_core::{HostPaths, MetricsEngine, RefreshIntervals};

/// Sampling options shared by every subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SamplingArgs {
    /// CPU refresh interval in milliseconds (0 = every frame)
    #[arg(long, default_value_t = RefreshIntervals::default().cpu_ms)]
    pub cpu_ms: u64,

    /// Memory refresh interval in milliseconds
    #[arg(long, default_value_t = RefreshIntervals::default().memory_ms)]
    pub memory_ms: u64,

    /// Temperature refresh interval in milliseconds
    #[arg(long, default_value_t = RefreshIntervals::default().temperature_ms)]
    pub temp_ms: u64,

    /// Battery refresh interval in milliseconds
    #[arg(long, default_value_t = RefreshIntervals::default().battery_ms)]
    pub battery_ms: u64,

    /// Process list refresh interval in milliseconds
    #[arg(long, default_value_t = RefreshIntervals::default().processes_ms)]
    pub processes_ms: u64,

    /// Read procfs/sysfs/os-release under this directory instead of `/`
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl Default for SamplingArgs {
    fn default() -> Self {
        let d = RefreshIntervals::default();
        Self {
            cpu_ms: d.cpu_ms,
            memory_ms: d.memory_ms,
            temp_ms: d.temperature_ms,
            battery_ms: d.battery_ms,
            processes_ms: d.processes_ms,
            root: None,
        }
    }
}

impl SamplingArgs {
    pub fn intervals(&self) -> RefreshIntervals {
        RefreshIntervals {
            cpu_ms: self.cpu_ms,
            memory_ms: self.memory_ms,
            temperature_ms: self.temp_ms,
            battery_ms: self.battery_ms,
            processes_ms: self.processes_ms,
        }
    }

    pub fn paths(&self) -> HostPaths {
        match &self.root {
            Some(root) => HostPaths::rooted(root),
            None => HostPaths::default(),
        }
    }
}

/// Build an engine configured from the command line.
pub fn make_engine(args: &SamplingArgs) -> MetricsEngine {
    MetricsEngine::with_intervals(args.paths(), args.intervals())
}

/// Render a KB count with a binary unit suffix.
pub fn format_kb(kb: u64) -> String {
    let units = ["KiB", "MiB", "GiB", "TiB"];
    let mut v = kb as f64;
    let mut idx = 0usize;
    while v >= 1024.0 && idx < units.len() - 1 {
        v /= 1024.0;
        idx += 1;
    }
    if idx == 0 {
        format!("{kb}{}", units[0])
    } else {
        format!("{v:.1}{}", units[idx])
    }
}
