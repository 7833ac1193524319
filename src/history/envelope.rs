//! JSONL envelope records and the append-only writer.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{ensure_parent, Snapshot};
use crate::error::Result;

/// Wrapper written around each snapshot in a `.jsonl` history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// ISO-8601 UTC timestamp of the append
    pub ts: String,
    pub kind: String,
    pub meta: serde_json::Map<String, serde_json::Value>,
    pub snapshot: Snapshot,
}

pub fn make_envelope(
    kind: &str,
    snapshot: Snapshot,
    meta: Option<serde_json::Map<String, serde_json::Value>>,
) -> Envelope {
    Envelope {
        ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        kind: kind.to_string(),
        meta: meta.unwrap_or_default(),
        snapshot,
    }
}

/// Append one envelope as a single line. Earlier records are never rewritten.
pub fn append_jsonl(path: impl AsRef<Path>, envelope: &Envelope) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut line = serde_json::to_string(envelope)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).read(true).append(true).open(path)?;

    // never glue a record onto an unterminated last line
    let len = file.metadata()?.len();
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            line.insert(0, '\n');
        }
    }

    // append mode writes at the end regardless of the read position
    file.write_all(line.as_bytes())?;

    tracing::debug!(path = %path.display(), kind = %envelope.kind, "appended jsonl record");
    Ok(())
}
