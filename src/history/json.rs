//! Reader for `.json` histories (single array, or a legacy wrapper object).

use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use super::{open_existing, Snapshot};
use crate::error::{Error, Result};

/// Keys searched, in order, when the top-level value is an object.
/// Older report payloads stored the list under one of these.
pub const LEGACY_LIST_KEYS: [&str; 3] = ["snapshots", "history", "items"];

pub fn read_json(path: &Path) -> Result<Vec<Snapshot>> {
    let Some(file) = open_existing(path)? else {
        return Ok(Vec::new());
    };

    let payload: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::malformed(path, e.to_string()))?;

    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut obj) => LEGACY_LIST_KEYS
            .iter()
            .find_map(|key| match obj.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| Error::malformed(path, "unsupported JSON history format"))?,
        _ => return Err(Error::malformed(path, "unsupported JSON history format")),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("history.json");
        fs::write(&path, content).unwrap();
        path
    }

    fn values(snaps: Vec<Snapshot>) -> Vec<Value> {
        snaps.into_iter().map(Value::Object).collect()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_json(&dir.path().join("nope.json")).unwrap().is_empty());
    }

    #[test]
    fn top_level_array_read_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"[{"used": 10}, {"used": 12}, {"used": 15}]"#);
        let snaps = read_json(&path).unwrap();
        assert_eq!(values(snaps), vec![json!({"used": 10}), json!({"used": 12}), json!({"used": 15})]);
    }

    #[test]
    fn legacy_snapshots_wrapper() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"snapshots": [{"a": 1}, {"a": 2}]}"#);
        assert_eq!(values(read_json(&path).unwrap()), vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn legacy_keys_searched_in_order() {
        let dir = TempDir::new().unwrap();
        // "snapshots" is not a list, so "history" wins over "items"
        let path = write(
            &dir,
            r#"{"items": [{"from": "items"}], "snapshots": 3, "history": [{"from": "history"}]}"#,
        );
        assert_eq!(values(read_json(&path).unwrap()), vec![json!({"from": "history"})]);
    }

    #[test]
    fn items_key_used_as_last_resort() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"items": [{"x": 1}]}"#);
        assert_eq!(values(read_json(&path).unwrap()), vec![json!({"x": 1})]);
    }

    #[test]
    fn object_without_list_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"count": 2}"#);
        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, Error::Malformed { path: ref p, .. } if p == &path));
    }

    #[test]
    fn scalar_top_level_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "42");
        assert!(matches!(read_json(&path), Err(Error::Malformed { .. })));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "[{\"used\": 1},");
        let err = read_json(&path).unwrap_err();
        assert!(err.to_string().contains("history.json"));
    }

    #[test]
    fn non_object_entry_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"[{"used": 1}, 7]"#);
        let err = read_json(&path).unwrap_err();
        assert!(err.to_string().contains("entry 1"));
    }
}
