//! The stateful sampler behind the dashboard.
//!
//! [`MetricsEngine`] keeps the latest observation of every metric family and
//! resamples each family on its own cadence when [`MetricsEngine::tick`] is
//! called. Accessors are plain reads of that state and never sample.
//!
//! The engine is infallible: a missing or malformed source either leaves the
//! previous value in place or sets that family's defined absent state.
//! Internal state is unsynchronized; callers sharing an engine across
//! threads must serialize access themselves.

use std::time::Instant;

use log::{debug, info, trace};
use serde::Serialize;

use crate::probe::HostPaths;
use crate::refresh::{MetricFamily, RefreshIntervals, RefreshSchedule};
use crate::sources::{
    BatteryStats, CpuStats, CpuTracker, DistroInfo, MemoryStats, PROCESS_RETAIN_LIMIT, battery,
    cpu, distro, memory, process, thermal,
};

/// Count the dashboard asks [`MetricsEngine::top_processes`] for.
pub const DEFAULT_PROCESS_COUNT: usize = 5;

/// Every accessor value at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub cpu_temperature_c: Option<f32>,
    pub battery: BatteryStats,
    pub top_processes: Vec<String>,
    pub distro: DistroInfo,
    pub intervals: RefreshIntervals,
}

pub struct MetricsEngine {
    paths: HostPaths,
    schedule: RefreshSchedule,
    cpu: CpuTracker,
    memory: MemoryStats,
    temperature: Option<f32>,
    battery: BatteryStats,
    processes: Vec<String>,
    distro: DistroInfo,
}

impl MetricsEngine {
    /// Engine reading the host's own procfs/sysfs.
    pub fn new() -> Self {
        Self::with_paths(HostPaths::default())
    }

    pub fn with_paths(paths: HostPaths) -> Self {
        Self::with_intervals(paths, RefreshIntervals::default())
    }

    /// Build an engine and sample every family once, so accessors never see
    /// uninitialized state.
    pub fn with_intervals(paths: HostPaths, intervals: RefreshIntervals) -> Self {
        let distro = distro::read_distro(&paths.os_release);
        info!(
            "metrics engine starting on {} (proc root {})",
            distro.name,
            paths.proc_root.display()
        );
        let mut engine = Self {
            paths,
            schedule: RefreshSchedule::new(intervals),
            cpu: CpuTracker::new(),
            memory: MemoryStats::default(),
            temperature: None,
            battery: BatteryStats::absent(),
            processes: Vec::new(),
            distro,
        };
        engine.tick();
        engine
    }

    /// Replace every refresh interval; takes effect on the next tick.
    pub fn configure(&mut self, intervals: RefreshIntervals) {
        debug!("refresh intervals now {intervals:?}");
        self.schedule.configure(intervals);
    }

    /// Positional form of [`configure`](Self::configure), in milliseconds.
    pub fn set_update_intervals(
        &mut self,
        cpu_ms: u64,
        memory_ms: u64,
        temperature_ms: u64,
        battery_ms: u64,
        processes_ms: u64,
    ) {
        self.configure(RefreshIntervals {
            cpu_ms,
            memory_ms,
            temperature_ms,
            battery_ms,
            processes_ms,
        });
    }

    pub fn intervals(&self) -> RefreshIntervals {
        self.schedule.intervals()
    }

    /// Resample every family whose interval has elapsed.
    pub fn tick(&mut self) -> Vec<MetricFamily> {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) against an explicit clock reading. Returns the
    /// families that were resampled.
    pub fn tick_at(&mut self, now: Instant) -> Vec<MetricFamily> {
        let mut refreshed = Vec::new();
        for family in MetricFamily::ALL {
            if self.schedule.due(family, now) {
                self.resample(family);
                refreshed.push(family);
            }
        }
        if !refreshed.is_empty() {
            trace!("resampled {refreshed:?}");
        }
        refreshed
    }

    fn resample(&mut self, family: MetricFamily) {
        match family {
            MetricFamily::Cpu => self.resample_cpu(),
            MetricFamily::Memory => self.resample_memory(),
            MetricFamily::Temperature => self.resample_temperature(),
            MetricFamily::Battery => self.resample_battery(),
            MetricFamily::Processes => self.resample_processes(),
        }
    }

    fn resample_cpu(&mut self) {
        match cpu::read_counters(&self.paths.stat()) {
            Ok(counters) => self.cpu.observe(counters),
            Err(e) => debug!("cpu counters unavailable: {e}"),
        }
    }

    fn resample_memory(&mut self) {
        match memory::read_meminfo(&self.paths.meminfo()) {
            Ok(info) => match memory::derive_stats(&info) {
                Some(stats) => self.memory = stats,
                None => debug!("meminfo reports zero total, keeping previous values"),
            },
            Err(e) => debug!("memory counters unavailable: {e}"),
        }
    }

    fn resample_temperature(&mut self) {
        match thermal::read_celsius(&self.paths.thermal_zone) {
            Ok(celsius) => self.temperature = Some(celsius),
            Err(e) => debug!("cpu temperature unavailable: {e}"),
        }
    }

    fn resample_battery(&mut self) {
        self.battery = match battery::read_battery(&self.paths) {
            Ok(stats) => stats,
            Err(e) => {
                if !e.is_absent() {
                    debug!("battery unreadable, reporting none: {e}");
                }
                BatteryStats::absent()
            }
        };
    }

    fn resample_processes(&mut self) {
        match process::read_process_names(&self.paths.proc_root) {
            Ok(names) => self.processes = process::rank(names, PROCESS_RETAIN_LIMIT),
            Err(e) => debug!("process list unavailable: {e}"),
        }
    }

    /// Re-read the distribution identity. Construction already reads it once.
    pub fn refresh_distro(&mut self) {
        self.distro = distro::read_distro(&self.paths.os_release);
    }

    pub fn cpu_stats(&self) -> CpuStats {
        self.cpu.stats()
    }

    pub fn memory_stats(&self) -> MemoryStats {
        self.memory
    }

    /// Degrees Celsius, or `None` when no thermal reading ever succeeded.
    pub fn cpu_temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn battery_stats(&self) -> &BatteryStats {
        &self.battery
    }

    /// The first `count` retained names. Never more than
    /// [`PROCESS_RETAIN_LIMIT`], whatever `count` is.
    pub fn top_processes(&self, count: usize) -> &[String] {
        &self.processes[..count.min(self.processes.len())]
    }

    pub fn distro_info(&self) -> &DistroInfo {
        &self.distro
    }

    pub fn paths(&self) -> &HostPaths {
        &self.paths
    }

    /// When `family` was last resampled.
    pub fn last_refreshed(&self, family: MetricFamily) -> Option<Instant> {
        self.schedule.last_refresh(family)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            cpu: self.cpu_stats(),
            memory: self.memory_stats(),
            cpu_temperature_c: self.cpu_temperature(),
            battery: self.battery.clone(),
            top_processes: self.top_processes(DEFAULT_PROCESS_COUNT).to_vec(),
            distro: self.distro.clone(),
            intervals: self.intervals(),
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_root_yields_defined_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let engine = MetricsEngine::with_paths(HostPaths::rooted(dir.path()));
        let cpu = engine.cpu_stats();
        assert!(!cpu.has_valid_measurement);
        assert_eq!(cpu.usage_percent, 0.0);
        assert_eq!(engine.memory_stats(), MemoryStats::default());
        assert_eq!(engine.cpu_temperature(), None);
        assert_eq!(engine.battery_stats(), &BatteryStats::absent());
        assert!(engine.top_processes(DEFAULT_PROCESS_COUNT).is_empty());
        assert_eq!(engine.distro_info().name, "Linux");
    }

    #[test]
    fn construction_stamps_every_family() {
        let dir = tempfile::tempdir().unwrap();
        let engine = MetricsEngine::with_paths(HostPaths::rooted(dir.path()));
        for family in MetricFamily::ALL {
            assert!(engine.last_refreshed(family).is_some(), "{family} not sampled");
        }
    }

    #[test]
    fn set_update_intervals_maps_positionally() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = MetricsEngine::with_paths(HostPaths::rooted(dir.path()));
        engine.set_update_intervals(1, 2, 3, 4, 5);
        assert_eq!(
            engine.intervals(),
            RefreshIntervals {
                cpu_ms: 1,
                memory_ms: 2,
                temperature_ms: 3,
                battery_ms: 4,
                processes_ms: 5,
            }
        );
    }
}
