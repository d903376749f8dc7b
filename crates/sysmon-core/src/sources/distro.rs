//! Distribution identity from `os-release`.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::probe;

/// Name shown when the distribution cannot be determined.
pub const FALLBACK_DISTRO: &str = "Linux";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistroInfo {
    pub name: String,
}

impl Default for DistroInfo {
    fn default() -> Self {
        Self {
            name: FALLBACK_DISTRO.to_string(),
        }
    }
}

/// Extract the `PRETTY_NAME` value from os-release text.
///
/// Only the first `PRETTY_NAME=` line is considered. The value is its first
/// double-quoted substring; an unquoted value is taken as-is.
pub fn parse_pretty_name(raw: &str) -> Option<String> {
    let value = raw
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))?
        .trim();
    let name = match value.split_once('"') {
        Some((_, rest)) => rest.split_once('"')?.0,
        None => value,
    };
    (!name.is_empty()).then(|| name.to_string())
}

pub fn read_distro(path: &Path) -> DistroInfo {
    match probe::read_text(path) {
        Ok(raw) => match parse_pretty_name(&raw) {
            Some(name) => DistroInfo { name },
            None => {
                debug!("{} has no usable PRETTY_NAME", path.display());
                DistroInfo::default()
            }
        },
        Err(e) => {
            debug!("distro identity unavailable: {e}");
            DistroInfo::default()
        }
    }
}
