//! Process name enumeration.

use std::path::Path;

use log::trace;

use crate::probe::{self, Reading};

/// Number of names retained per resample.
pub const PROCESS_RETAIN_LIMIT: usize = 5;

fn is_pid_dir(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Collect the `comm` name of every numeric entry under `proc_root`.
///
/// Processes can exit between listing and reading, so entries whose name
/// cannot be read are skipped rather than failing the scan. Names are
/// decoded lossily; an empty name is skipped.
pub fn read_process_names(proc_root: &Path) -> Reading<Vec<String>> {
    let entries = std::fs::read_dir(proc_root).map_err(|e| probe::classify(proc_root, e))?;

    let mut names = Vec::new();
    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(pid) = file_name.to_str() else {
            continue;
        };
        if !is_pid_dir(pid) {
            continue;
        }
        match probe::read_first_line(&entry.path().join("comm")) {
            Ok(name) if !name.is_empty() => names.push(name),
            Ok(_) => {}
            Err(e) => trace!("skipping pid {pid}: {e}"),
        }
    }
    Ok(names)
}

/// Sort ascending by byte value and keep at most `limit` names.
/// Duplicates are kept.
pub fn rank(mut names: Vec<String>, limit: usize) -> Vec<String> {
    names.sort_unstable();
    names.truncate(limit);
    names
}
