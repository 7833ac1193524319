//! Disk usage scanner.
//!
//! Walks a root directory and produces the snapshot that gets persisted to
//! history: total size, file count, skipped entries and cumulative sizes for
//! every directory down to the requested depth.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::Result;
use crate::history::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskUsage {
    pub root: String,
    pub depth: usize,
    pub total_bytes: u64,
    pub file_count: u64,
    /// entries that could not be read and were left out of the totals
    pub skipped: u64,
    /// relative directory path -> cumulative bytes of files beneath it
    pub paths: BTreeMap<String, u64>,
}

impl DiskUsage {
    pub fn into_snapshot(self) -> Snapshot {
        let paths: Snapshot = self
            .paths
            .into_iter()
            .map(|(path, bytes)| (path, Value::from(bytes)))
            .collect();

        let mut snapshot = Snapshot::new();
        snapshot.insert("root".to_string(), Value::from(self.root));
        snapshot.insert("depth".to_string(), Value::from(self.depth));
        snapshot.insert("total_bytes".to_string(), Value::from(self.total_bytes));
        snapshot.insert("file_count".to_string(), Value::from(self.file_count));
        snapshot.insert("skipped".to_string(), Value::from(self.skipped));
        snapshot.insert("paths".to_string(), Value::Object(paths));
        snapshot
    }
}

/// Scan `root` and return its usage as a history snapshot.
pub fn run(root: &Path, depth: usize) -> Result<Snapshot> {
    Ok(measure(root, depth)?.into_snapshot())
}

pub fn measure(root: &Path, depth: usize) -> Result<DiskUsage> {
    // a missing or unreadable root is an error, unlike entries beneath it
    fs::metadata(root)?;

    let mut usage = DiskUsage {
        root: root.display().to_string(),
        depth,
        total_bytes: 0,
        file_count: 0,
        skipped: 0,
        paths: BTreeMap::new(),
    };

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                usage.skipped += 1;
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let parts = components(relative);

        if entry.file_type().is_dir() {
            // record empty directories too, so they show up with zero bytes
            if (1..=depth).contains(&parts.len()) {
                usage.paths.entry(parts.join("/")).or_insert(0);
            }
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::warn!("skipping {}: {e}", entry.path().display());
                usage.skipped += 1;
                continue;
            }
        };

        usage.total_bytes = usage.total_bytes.saturating_add(size);
        usage.file_count += 1;

        // credit every ancestor directory within the depth limit
        let ancestors = parts.len().saturating_sub(1).min(depth);
        for level in 1..=ancestors {
            let bytes = usage.paths.entry(parts[..level].join("/")).or_insert(0);
            *bytes = bytes.saturating_add(size);
        }
    }

    tracing::debug!(
        root = %usage.root,
        files = usage.file_count,
        bytes = usage.total_bytes,
        skipped = usage.skipped,
        "scan complete"
    );

    Ok(usage)
}

fn components(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
