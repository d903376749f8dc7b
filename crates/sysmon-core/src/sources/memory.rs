//! Memory accounting from `meminfo`.
//!
//! Buffers and page cache are reclaimable, so they count as free: this
//! reports "used vs. available" rather than a strict free-list split.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::probe::{self, Reading};

/// Raw `meminfo` fields consumed, in KB. Missing keys read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kb: u64,
    pub free_kb: u64,
    pub buffers_kb: u64,
    pub cached_kb: u64,
}

/// What accessors see for the memory family.
///
/// `used_kb + free_kb == total_kb` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub usage_percent: f32,
    pub total_kb: u64,
    pub used_kb: u64,
    pub free_kb: u64,
}

pub fn parse_meminfo(raw: &str) -> MemInfo {
    let mut info = MemInfo::default();
    for line in raw.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(value) = rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse::<u64>().ok())
        else {
            continue;
        };
        match key {
            "MemTotal" => info.total_kb = value,
            "MemFree" => info.free_kb = value,
            "Buffers" => info.buffers_kb = value,
            "Cached" => info.cached_kb = value,
            _ => {}
        }
    }
    info
}

/// Derive the accessor view, or `None` when the total is zero.
pub fn derive_stats(info: &MemInfo) -> Option<MemoryStats> {
    if info.total_kb == 0 {
        return None;
    }
    let free_kb = info
        .free_kb
        .saturating_add(info.buffers_kb)
        .saturating_add(info.cached_kb)
        .min(info.total_kb);
    let used_kb = info.total_kb - free_kb;
    Some(MemoryStats {
        usage_percent: (used_kb as f64 * 100.0 / info.total_kb as f64) as f32,
        total_kb: info.total_kb,
        used_kb,
        free_kb,
    })
}

pub fn read_meminfo(path: &Path) -> Reading<MemInfo> {
    probe::read_text(path).map(|raw| parse_meminfo(&raw))
}
