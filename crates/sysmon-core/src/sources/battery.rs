//! Battery state from a power-supply device directory.
//!
//! Batteries are optional hardware: a missing device is a defined state,
//! not a failure.

use serde::{Deserialize, Serialize};

use crate::probe::{self, HostPaths, Reading};

/// Label reported when no battery device is present.
pub const NO_BATTERY: &str = "No Battery";

/// Exact status word that marks a charging battery.
pub const CHARGING: &str = "Charging";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryStats {
    pub present: bool,
    pub charging: bool,
    /// Charge level, 0..=100.
    pub percentage: f32,
    pub status: String,
}

impl BatteryStats {
    /// The state reported when no battery device exists.
    pub fn absent() -> Self {
        Self {
            present: false,
            charging: false,
            percentage: 0.0,
            status: NO_BATTERY.to_string(),
        }
    }

    /// Build a present battery from its raw `capacity` and `status` lines.
    ///
    /// A capacity that does not parse reads as zero; the battery is still
    /// present.
    pub fn from_raw(capacity: &str, status: &str) -> Self {
        let percentage = capacity
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 100.0))
            .unwrap_or(0.0);
        let status = status.trim().to_string();
        Self {
            present: true,
            charging: status == CHARGING,
            percentage,
            status,
        }
    }
}

impl Default for BatteryStats {
    fn default() -> Self {
        Self::absent()
    }
}

/// Probe the battery device. Both `status` and `capacity` must exist and be
/// readable for the battery to count as present; their content is never a
/// reason for absence.
pub fn read_battery(paths: &HostPaths) -> Reading<BatteryStats> {
    let status = probe::read_first_line(&paths.battery_status())?;
    let capacity = probe::read_first_line(&paths.battery_capacity())?;
    Ok(BatteryStats::from_raw(&capacity, &status))
}
