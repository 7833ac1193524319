use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// empty config so the user's own config file never leaks into a test
fn snaplog(dir: &Path) -> Command {
    let config = dir.join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("snaplog").unwrap();
    cmd.arg("--config").arg(config).env_remove("RUST_LOG");
    cmd
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("build")).unwrap();
    fs::write(dir.path().join("build/out.bin"), vec![0u8; 2048]).unwrap();
    dir
}

#[test]
fn scan_twice_then_diff_as_json() {
    let work = TempDir::new().unwrap();
    let data = data_dir();
    let history = work.path().join("history.jsonl");

    for _ in 0..2 {
        snaplog(work.path())
            .arg("--history")
            .arg(&history)
            .arg("scan")
            .arg(data.path())
            .args(["--depth", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("saved snapshot"));
    }

    let output = snaplog(work.path())
        .arg("--history")
        .arg(&history)
        .args(["--json", "diff"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let diff: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(diff["before"]["total_bytes"], Value::from(2048));
    assert_eq!(diff["after"]["paths"]["build"], Value::from(2048));
}

#[test]
fn report_table_on_json_history() {
    let work = TempDir::new().unwrap();
    let history = work.path().join("history.json");
    fs::write(&history, r#"[{"used": 10}, {"used": 12}, {"used": 15}]"#).unwrap();

    snaplog(work.path())
        .arg("--history")
        .arg(&history)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Snapshots: 3"));
}

#[test]
fn advise_with_single_snapshot_fails() {
    let work = TempDir::new().unwrap();
    let history = work.path().join("history.jsonl");
    fs::write(&history, "{\"used\": 1}\n").unwrap();

    snaplog(work.path())
        .arg("--history")
        .arg(&history)
        .arg("advise")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("need at least 2 snapshots"));
}

#[test]
fn unsupported_history_extension_fails() {
    let work = TempDir::new().unwrap();
    let data = data_dir();

    snaplog(work.path())
        .arg("--history")
        .arg(work.path().join("history.txt"))
        .arg("scan")
        .arg(data.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported history format"));
}

#[test]
fn config_file_supplies_history_path() {
    let work = TempDir::new().unwrap();
    let history = work.path().join("from-config.json");
    fs::write(&history, r#"{"items": [{"a": 1}, {"a": 2}]}"#).unwrap();
    fs::write(
        work.path().join("config.toml"),
        format!("history = {:?}\n", history.display().to_string()),
    )
    .unwrap();

    snaplog(work.path())
        .args(["--json", "advise"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"snapshots\": 2"));
}
