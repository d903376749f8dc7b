//! Independent refresh cadences per metric family.
//!
//! A single synchronous [`RefreshSchedule`] replaces one timer per metric:
//! the engine asks it on every tick which families are due and samples only
//! those.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// A group of metrics that is resampled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricFamily {
    Cpu,
    Memory,
    Temperature,
    Battery,
    Processes,
}

impl MetricFamily {
    /// Every family, in the order a tick visits them.
    pub const ALL: [MetricFamily; 5] = [
        Self::Cpu,
        Self::Memory,
        Self::Temperature,
        Self::Battery,
        Self::Processes,
    ];

    fn index(self) -> usize {
        match self {
            Self::Cpu => 0,
            Self::Memory => 1,
            Self::Temperature => 2,
            Self::Battery => 3,
            Self::Processes => 4,
        }
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Memory => write!(f, "memory"),
            Self::Temperature => write!(f, "temperature"),
            Self::Battery => write!(f, "battery"),
            Self::Processes => write!(f, "processes"),
        }
    }
}

/// Refresh interval per family, in milliseconds. Zero means every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshIntervals {
    pub cpu_ms: u64,
    pub memory_ms: u64,
    pub temperature_ms: u64,
    pub battery_ms: u64,
    pub processes_ms: u64,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            cpu_ms: 1000,
            memory_ms: 1000,
            temperature_ms: 2000,
            battery_ms: 5000,
            processes_ms: 2000,
        }
    }
}

impl RefreshIntervals {
    /// Every family resampled on every tick.
    pub const EVERY_TICK: Self = Self {
        cpu_ms: 0,
        memory_ms: 0,
        temperature_ms: 0,
        battery_ms: 0,
        processes_ms: 0,
    };

    pub fn get(&self, family: MetricFamily) -> Duration {
        let ms = match family {
            MetricFamily::Cpu => self.cpu_ms,
            MetricFamily::Memory => self.memory_ms,
            MetricFamily::Temperature => self.temperature_ms,
            MetricFamily::Battery => self.battery_ms,
            MetricFamily::Processes => self.processes_ms,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Copy)]
struct RefreshEntry {
    interval: Duration,
    // None until the family has been sampled once, so it is always due.
    last_refresh: Option<Instant>,
}

/// Table mapping each family to its interval and last refresh time.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    entries: [RefreshEntry; 5],
    intervals: RefreshIntervals,
}

impl RefreshSchedule {
    pub fn new(intervals: RefreshIntervals) -> Self {
        let entries = MetricFamily::ALL.map(|family| RefreshEntry {
            interval: intervals.get(family),
            last_refresh: None,
        });
        Self { entries, intervals }
    }

    /// Replace every interval. Timestamps are kept, so a shorter interval
    /// takes effect on the next tick.
    pub fn configure(&mut self, intervals: RefreshIntervals) {
        for family in MetricFamily::ALL {
            self.entries[family.index()].interval = intervals.get(family);
        }
        self.intervals = intervals;
    }

    pub fn intervals(&self) -> RefreshIntervals {
        self.intervals
    }

    /// Whether `family` should be resampled at `now`. A due family is
    /// stamped with `now` before returning.
    pub fn due(&mut self, family: MetricFamily, now: Instant) -> bool {
        let entry = &mut self.entries[family.index()];
        let due = match entry.last_refresh {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= entry.interval,
        };
        if due {
            entry.last_refresh = Some(now);
        }
        due
    }

    pub fn last_refresh(&self, family: MetricFamily) -> Option<Instant> {
        self.entries[family.index()].last_refresh
    }
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self::new(RefreshIntervals::default())
    }
}
