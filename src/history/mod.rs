//! Dual-format snapshot history log.
//!
//! A history is an ordered sequence of snapshots stored in one of two
//! encodings, picked by file extension:
//! - `.json`: a single array, rewritten in full on every append
//! - `.jsonl`: one object per line, appended without touching earlier lines
//!
//! Both encodings read back into the same `Vec<Snapshot>`.

pub mod envelope;
pub mod json;
pub mod jsonl;

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

pub use envelope::{append_jsonl, make_envelope, Envelope};

/// Opaque snapshot record. The log never looks inside it.
pub type Snapshot = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Json,
    Jsonl,
}

impl HistoryFormat {
    /// Resolve the encoding from the path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(HistoryFormat::Json),
            Some("jsonl") => Ok(HistoryFormat::Jsonl),
            _ => Err(Error::UnsupportedFormat { path: path.to_path_buf() }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryFormat::Json => "json",
            HistoryFormat::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for HistoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read a history of either encoding and normalize it to bare snapshots.
///
/// The format tag is returned alongside the sequence so callers can tell
/// which physical encoding backs the path.
pub fn read_history_auto(path: impl AsRef<Path>) -> Result<(HistoryFormat, Vec<Snapshot>)> {
    let path = path.as_ref();
    let format = HistoryFormat::from_path(path)?;

    let snapshots = match format {
        HistoryFormat::Json => json::read_json(path)?,
        HistoryFormat::Jsonl => jsonl::read_jsonl(path)?,
    };

    tracing::debug!(path = %path.display(), %format, count = snapshots.len(), "read history");
    Ok((format, snapshots))
}

/// Open `path` for reading, or `None` when it is missing or zero-length.
pub(crate) fn open_existing(path: &Path) -> Result<Option<File>> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => Ok(None),
        Ok(_) => Ok(Some(File::open(path)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Create every missing ancestor of `path`.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}
