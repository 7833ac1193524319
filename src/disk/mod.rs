//! Disk snapshot history.
//!
//! Domain entry points on top of the history log:
//! - persist a scan result to a `.json` or `.jsonl` history
//! - load at least two snapshots for analysis
//! - report, diff and advise views over the loaded sequence

pub mod analysis;

use std::fs;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::history::{self, HistoryFormat, Snapshot};

pub use analysis::{
    disk_advise, disk_diff, disk_report, load_snapshots_for_analysis, DiskAdvise, DiskDiff,
    DiskReport, ADVICE,
};

/// Envelope kind tag for disk snapshots.
pub const DISK_KIND: &str = "disk";

/// Persist a disk snapshot according to the history extension.
///
/// `.jsonl` histories get an envelope carrying `root` and `depth`; `.json`
/// histories store the bare snapshot and are rewritten in full.
pub fn persist_disk_snapshot(
    history_path: impl AsRef<Path>,
    root: &str,
    depth: usize,
    snapshot: Snapshot,
) -> Result<()> {
    let history_path = history_path.as_ref();

    match HistoryFormat::from_path(history_path)? {
        HistoryFormat::Jsonl => {
            let mut meta = serde_json::Map::new();
            meta.insert("root".to_string(), Value::from(root));
            meta.insert("depth".to_string(), Value::from(depth));
            let envelope = history::make_envelope(DISK_KIND, snapshot, Some(meta));
            history::append_jsonl(history_path, &envelope)
        }
        HistoryFormat::Json => append_json_history(history_path, snapshot),
    }
}

// read the whole file, push, rewrite the whole file. the write is the last
// step so a parse failure leaves the existing history untouched.
fn append_json_history(path: &Path, snapshot: Snapshot) -> Result<()> {
    history::ensure_parent(path)?;

    let mut snapshots = match history::open_existing(path)? {
        Some(file) => {
            let payload: Value = serde_json::from_reader(BufReader::new(file))
                .map_err(|e| Error::malformed(path, e.to_string()))?;
            existing_sequence(path, payload)?
        }
        None => Vec::new(),
    };

    snapshots.push(snapshot);
    let count = snapshots.len();

    // serde_json pretty printing is two-space indented and leaves non-ascii unescaped
    let encoded = serde_json::to_string_pretty(&snapshots)?;
    fs::write(path, encoded)?;

    tracing::debug!(path = %path.display(), count, "rewrote json history");
    Ok(())
}

/// Entries already in a `.json` history.
///
/// Only the `snapshots` wrapper key is recovered on write; any other shape
/// starts a fresh sequence. A non-object entry fails the append so the
/// rewrite never produces a file the reader would refuse.
fn existing_sequence(path: &Path, payload: Value) -> Result<Vec<Snapshot>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("snapshots") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(snapshot) => Ok(snapshot),
            _ => Err(Error::malformed(path, format!("entry {idx} is not an object"))),
        })
        .collect()
}
