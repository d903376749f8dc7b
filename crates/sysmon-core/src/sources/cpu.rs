//! Aggregate CPU utilization from the machine-wide counter table.
//!
//! Usage is a delta between two observations of monotonically increasing
//! tick counters, so the first observation only establishes a baseline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::probe::{self, Reading, Unavailable};

/// Cumulative tick counters since boot for the whole machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuCounters {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl CpuCounters {
    pub fn total(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
            .saturating_add(self.idle)
    }
}

/// What accessors see for the CPU family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    /// Busy share of the last interval, 0..=100. Zero until
    /// `has_valid_measurement` is true.
    pub usage_percent: f32,
    /// Most recent raw counters.
    pub counters: CpuCounters,
    /// False until two observations have been taken.
    pub has_valid_measurement: bool,
}

/// Parse the `cpu ` summary line of a stat table.
///
/// Only the first four fields (user, nice, system, idle) are consumed; the
/// line must carry at least those.
pub fn parse_stat(raw: &str) -> Option<CpuCounters> {
    let line = raw.lines().find(|l| l.starts_with("cpu "))?;
    let mut fields = line.split_whitespace().skip(1).map(str::parse::<u64>);
    let mut next = || fields.next()?.ok();
    Some(CpuCounters {
        user: next()?,
        nice: next()?,
        system: next()?,
        idle: next()?,
    })
}

/// Read the aggregate counters from a stat file.
pub fn read_counters(path: &Path) -> Reading<CpuCounters> {
    let raw = probe::read_text(path)?;
    parse_stat(&raw).ok_or_else(|| Unavailable::malformed(path, "no aggregate cpu line"))
}

/// Busy percentage between two observations, or `None` when no ticks
/// elapsed.
///
/// Counter regressions saturate to zero and the idle delta is clamped to
/// the total delta, so the result always lies in 0..=100.
pub fn usage_between(prev: &CpuCounters, curr: &CpuCounters) -> Option<f32> {
    let total_delta = curr.total().saturating_sub(prev.total());
    if total_delta == 0 {
        return None;
    }
    let idle_delta = curr.idle.saturating_sub(prev.idle).min(total_delta);
    let busy = (total_delta - idle_delta) as f64;
    Some((busy * 100.0 / total_delta as f64) as f32)
}

#[derive(Debug, Clone, Copy, Default)]
enum CpuState {
    /// No observation has succeeded yet.
    #[default]
    Absent,
    /// One observation exists; no usage can be derived yet.
    Cold { baseline: CpuCounters },
    /// At least two observations exist.
    Warm {
        previous: CpuCounters,
        usage_percent: f32,
    },
}

/// Holds the previous observation and derives usage from each new one.
#[derive(Debug, Clone, Default)]
pub struct CpuTracker {
    state: CpuState,
}

impl CpuTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a new observation.
    ///
    /// When no ticks elapsed since the previous observation the last usage is
    /// retained; the new counters still become the baseline.
    pub fn observe(&mut self, curr: CpuCounters) {
        self.state = match self.state {
            CpuState::Absent => CpuState::Cold { baseline: curr },
            CpuState::Cold { baseline } => match usage_between(&baseline, &curr) {
                Some(usage_percent) => CpuState::Warm {
                    previous: curr,
                    usage_percent,
                },
                None => CpuState::Cold { baseline: curr },
            },
            CpuState::Warm {
                previous,
                usage_percent,
            } => CpuState::Warm {
                previous: curr,
                usage_percent: usage_between(&previous, &curr).unwrap_or(usage_percent),
            },
        };
    }

    pub fn stats(&self) -> CpuStats {
        match self.state {
            CpuState::Absent => CpuStats::default(),
            CpuState::Cold { baseline } => CpuStats {
                usage_percent: 0.0,
                counters: baseline,
                has_valid_measurement: false,
            },
            CpuState::Warm {
                previous,
                usage_percent,
            } => CpuStats {
                usage_percent,
                counters: previous,
                has_valid_measurement: true,
            },
        }
    }
}
