//! Plain-text rendering for the aggregate views.
//!
//! Snapshots are opaque, so rows are just their top-level keys:
//! - report shows first and last snapshot as key/value rows
//! - diff lines the last two snapshots up side by side
//! - advise is a two-line summary

use serde_json::Value;

use crate::disk::{DiskAdvise, DiskDiff, DiskReport};
use crate::history::Snapshot;
use crate::util::format_bytes;

const KEY_WIDTH: usize = 24;
const VALUE_WIDTH: usize = 20;

pub fn render_report(report: &DiskReport) -> String {
    let mut output = format!("Snapshots: {}\n", report.count);

    for (title, snapshot) in [("First", &report.first), ("Last", &report.last)] {
        output.push_str(&format!("\n{title}\n"));
        output.push_str(&"-".repeat(KEY_WIDTH + VALUE_WIDTH * 2));
        output.push('\n');

        if snapshot.is_empty() {
            output.push_str("  (empty snapshot)\n");
        }
        for (key, value) in snapshot {
            output.push_str(&format!(
                "  {:KEY_WIDTH$} {}\n",
                truncate(key, KEY_WIDTH),
                truncate(&format_value(key, value), VALUE_WIDTH * 2)
            ));
        }
    }

    output
}

pub fn render_diff(diff: &DiskDiff) -> String {
    let mut output = format!(
        "  {:KEY_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$}\n",
        "", "before", "after"
    );
    output.push_str(&"-".repeat(KEY_WIDTH + VALUE_WIDTH * 2 + 4));
    output.push('\n');

    for key in union_keys(&diff.before, &diff.after) {
        let cell = |snapshot: &Snapshot| {
            snapshot
                .get(key)
                .map(|v| format_value(key, v))
                .unwrap_or_else(|| "-".to_string())
        };

        output.push_str(&format!(
            "  {:KEY_WIDTH$} {:>VALUE_WIDTH$} {:>VALUE_WIDTH$}\n",
            truncate(key, KEY_WIDTH),
            truncate(&cell(&diff.before), VALUE_WIDTH),
            truncate(&cell(&diff.after), VALUE_WIDTH)
        ));
    }

    output
}

pub fn render_advise(advise: &DiskAdvise) -> String {
    format!("Snapshots: {}\nAdvice: {}\n", advise.snapshots, advise.advice)
}

// keys of `before` in order, then keys only present in `after`
fn union_keys<'a>(before: &'a Snapshot, after: &'a Snapshot) -> Vec<&'a str> {
    let mut keys: Vec<&str> = before.keys().map(String::as_str).collect();
    for key in after.keys() {
        if !before.contains_key(key) {
            keys.push(key);
        }
    }
    keys
}

fn format_value(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) if key.ends_with("_bytes") => match n.as_u64() {
            Some(bytes) => format_bytes(bytes),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}
