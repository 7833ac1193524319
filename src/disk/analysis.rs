//! Report, diff and advise views over a loaded disk history.
//!
//! None of these interpret snapshot contents. They pick records out of the
//! sequence and hand them back verbatim for the caller to format.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::history::{read_history_auto, Snapshot};

/// Fixed advisory text. Advice is not computed from the history yet.
pub const ADVICE: &str = "review growing paths";

/// Fewest snapshots that give a baseline to compare against.
pub const MIN_SNAPSHOTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskReport {
    pub count: usize,
    pub first: Snapshot,
    pub last: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskDiff {
    pub before: Snapshot,
    pub after: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskAdvise {
    pub snapshots: usize,
    pub advice: String,
}

/// Load a history of either format, requiring at least two snapshots.
pub fn load_snapshots_for_analysis(history_path: impl AsRef<Path>) -> Result<Vec<Snapshot>> {
    let (_, snaps) = read_history_auto(history_path)?;
    if snaps.len() < MIN_SNAPSHOTS {
        return Err(Error::NotEnoughSnapshots { found: snaps.len() });
    }
    Ok(snaps)
}

pub fn disk_report(history_path: impl AsRef<Path>) -> Result<DiskReport> {
    let mut snaps = load_snapshots_for_analysis(history_path)?;
    let count = snaps.len();
    let last = snaps.swap_remove(count - 1);
    let first = snaps.swap_remove(0);
    Ok(DiskReport { count, first, last })
}

pub fn disk_diff(history_path: impl AsRef<Path>) -> Result<DiskDiff> {
    let mut snaps = load_snapshots_for_analysis(history_path)?;
    let after = snaps.swap_remove(snaps.len() - 1);
    let before = snaps.swap_remove(snaps.len() - 1);
    Ok(DiskDiff { before, after })
}

pub fn disk_advise(history_path: impl AsRef<Path>) -> Result<DiskAdvise> {
    let snaps = load_snapshots_for_analysis(history_path)?;
    Ok(DiskAdvise {
        snapshots: snaps.len(),
        advice: ADVICE.to_string(),
    })
}
