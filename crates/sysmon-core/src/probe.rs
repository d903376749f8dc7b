//! Best-effort reads of OS-exposed pseudo-files.
//!
//! Every read returns a [`Reading`]: either the parsed value or an explicit
//! [`Unavailable`] describing why the source could not be used. Batteries,
//! thermal zones and even `/etc/os-release` are optional, so callers branch
//! on the result and fall back instead of propagating it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Why a source could not produce a value.
#[derive(Debug, thiserror::Error)]
pub enum Unavailable {
    /// The source does not exist on this host.
    #[error("{} does not exist", .path.display())]
    Absent { path: PathBuf },
    /// The source exists but could not be read.
    #[error("{} could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The source was read but its content did not parse.
    #[error("{} is malformed: {detail}", .path.display())]
    Malformed { path: PathBuf, detail: String },
}

impl Unavailable {
    pub fn malformed(path: &Path, detail: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }

    /// True when the source simply does not exist.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent { .. })
    }
}

/// Result of a capability-returning read.
pub type Reading<T> = Result<T, Unavailable>;

/// Filesystem locations consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    /// Process root; `stat`, `meminfo` and the numeric per-process
    /// directories live under it.
    pub proc_root: PathBuf,
    /// Thermal zone temperature file (milli-degrees Celsius).
    pub thermal_zone: PathBuf,
    /// Battery device directory holding `status` and `capacity`.
    pub battery_dir: PathBuf,
    /// Distribution identity file.
    pub os_release: PathBuf,
}

impl Default for HostPaths {
    fn default() -> Self {
        Self::rooted("/")
    }
}

impl HostPaths {
    /// Default layout re-based under `root`.
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            proc_root: root.join("proc"),
            thermal_zone: root.join("sys/class/thermal/thermal_zone0/temp"),
            battery_dir: root.join("sys/class/power_supply/BAT0"),
            os_release: root.join("etc/os-release"),
        }
    }

    pub fn with_proc_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.proc_root = path.into();
        self
    }

    pub fn with_thermal_zone(mut self, path: impl Into<PathBuf>) -> Self {
        self.thermal_zone = path.into();
        self
    }

    pub fn with_battery_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.battery_dir = path.into();
        self
    }

    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }

    pub fn stat(&self) -> PathBuf {
        self.proc_root.join("stat")
    }

    pub fn meminfo(&self) -> PathBuf {
        self.proc_root.join("meminfo")
    }

    pub fn battery_status(&self) -> PathBuf {
        self.battery_dir.join("status")
    }

    pub fn battery_capacity(&self) -> PathBuf {
        self.battery_dir.join("capacity")
    }
}

pub(crate) fn classify(path: &Path, err: std::io::Error) -> Unavailable {
    if err.kind() == ErrorKind::NotFound {
        Unavailable::Absent {
            path: path.to_path_buf(),
        }
    } else {
        Unavailable::Unreadable {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Read a whole source as text.
pub fn read_text(path: &Path) -> Reading<String> {
    std::fs::read_to_string(path).map_err(|e| classify(path, e))
}

/// Read the first line of a source with the line terminator stripped.
///
/// Content is never rejected: an empty source yields an empty string and
/// invalid UTF-8 is replaced, so only a missing or unreadable source is
/// unavailable.
pub fn read_first_line(path: &Path) -> Reading<String> {
    let raw = std::fs::read(path).map_err(|e| classify(path, e))?;
    let line = raw.split(|&b| b == b'\n').next().unwrap_or_default();
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Ok(String::from_utf8_lossy(line).into_owned())
}

/// Parse the first whitespace-separated token of a source.
pub fn read_first_number<T: std::str::FromStr>(path: &Path) -> Reading<T> {
    let raw = read_text(path)?;
    raw.split_whitespace()
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| Unavailable::malformed(path, format!("not a number: {:?}", raw.trim())))
}
