//! Reader for `.jsonl` histories.
//!
//! Each non-blank line is either an envelope (unwrapped to its `snapshot`)
//! or a bare snapshot object written by older tooling.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use super::{open_existing, Snapshot};
use crate::error::{Error, Result};

pub fn read_jsonl(path: &Path) -> Result<Vec<Snapshot>> {
    let Some(file) = open_existing(path)? else {
        return Ok(Vec::new());
    };

    let mut snapshots = Vec::new();

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let lineno = idx + 1;
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => Error::malformed(path, format!("line {lineno}: {e}")),
            _ => Error::Io(e),
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let item: Value = serde_json::from_str(line)
            .map_err(|e| Error::malformed(path, format!("line {lineno}: {e}")))?;

        let Value::Object(mut record) = item else {
            return Err(Error::malformed(path, format!("line {lineno}: invalid JSONL record")));
        };

        // an envelope only when `snapshot` holds an object, otherwise a bare snapshot
        if matches!(record.get("snapshot"), Some(Value::Object(_))) {
            if let Some(Value::Object(snapshot)) = record.remove("snapshot") {
                snapshots.push(snapshot);
            }
        } else {
            snapshots.push(record);
        }
    }

    Ok(snapshots)
}
