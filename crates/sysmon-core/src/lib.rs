//! # sysmon-core
//!
//! **Turns raw host counters into stable, correctly scaled numbers.**
//!
//! `sysmon-core` samples CPU utilization, memory usage, CPU temperature,
//! battery state, process names and the distribution identity from the
//! pseudo-files a Linux host exposes, and derives the percentages a dashboard
//! shows.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sysmon_core::{MetricsEngine, RefreshIntervals};
//!
//! let mut engine = MetricsEngine::new();
//! engine.configure(RefreshIntervals {
//!     cpu_ms: 500,
//!     ..RefreshIntervals::default()
//! });
//!
//! loop {
//!     engine.tick();
//!     let cpu = engine.cpu_stats();
//!     if cpu.has_valid_measurement {
//!         println!("cpu {:.1}%", cpu.usage_percent);
//!     }
//!     std::thread::sleep(std::time::Duration::from_millis(100));
//! }
//! ```
//!
//! ## Architecture
//!
//! Sources → Probe (`Reading<T>`) → Engine state → Accessors
//!
//! - [`probe`] reads a pseudo-file and returns the parsed value or an
//!   explicit [`Unavailable`].
//! - [`sources`] hold one parser/sampler per metric family.
//! - [`refresh`] decides, per family, whether a tick should resample.
//! - [`MetricsEngine`] ties them together and converts every failure into
//!   "keep the previous value" or a defined absent state.

pub mod engine;
pub mod probe;
pub mod refresh;
pub mod sources;

pub use engine::{DEFAULT_PROCESS_COUNT, EngineSnapshot, MetricsEngine};
pub use probe::{HostPaths, Reading, Unavailable};
pub use refresh::{MetricFamily, RefreshIntervals, RefreshSchedule};
pub use sources::{
    BatteryStats, CpuCounters, CpuStats, DistroInfo, FALLBACK_DISTRO, MemoryStats, NO_BATTERY,
    PROCESS_RETAIN_LIMIT,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
