//! CPU temperature from a thermal zone.

use std::path::Path;

use crate::probe::{self, Reading};

/// Read a milli-degree value and scale it to degrees Celsius.
pub fn read_celsius(path: &Path) -> Reading<f32> {
    probe::read_first_number::<i64>(path).map(|milli| (milli as f64 / 1000.0) as f32)
}
