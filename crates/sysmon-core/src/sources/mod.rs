//! One reader per metric family.
//!
//! Each module pairs a pure parser with a sampler that applies it to the
//! path named by [`HostPaths`](crate::probe::HostPaths).

pub mod battery;
pub mod cpu;
pub mod distro;
pub mod memory;
pub mod process;
pub mod thermal;

pub use battery::{BatteryStats, NO_BATTERY};
pub use cpu::{CpuCounters, CpuStats, CpuTracker};
pub use distro::{DistroInfo, FALLBACK_DISTRO};
pub use memory::MemoryStats;
pub use process::PROCESS_RETAIN_LIMIT;
