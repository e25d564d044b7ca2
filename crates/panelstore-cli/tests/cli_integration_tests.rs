//! CLI integration tests
//!
//! Drive the `panelstore` binary against a temporary data directory and check
//! its JSON output and exit status.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_panelstore"))
        .current_dir(dir)
        .env_remove("PANELSTORE_DATA_DIR")
        .env_remove("PANELSTORE_EXTENSION")
        .env_remove("PANELSTORE_CONFIG")
        .arg("--data-dir")
        .arg(dir.join("data"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn run_ok(dir: &Path, args: &[&str]) -> Value {
    let output = run(dir, args);
    assert!(
        output.status.success(),
        "panelstore {:?} should succeed. Stderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn seeded(rows: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    run_ok(
        temp_dir.path(),
        &["generate", "--rows", rows, "--seed", "11", "--create"],
    );
    temp_dir
}

#[test]
fn test_generate_with_create_reports_both_steps() {
    let temp_dir = TempDir::new().unwrap();

    let out = run_ok(
        temp_dir.path(),
        &["generate", "--rows", "8", "--seed", "1", "--create"],
    );

    assert_eq!(out["generated"]["rows"], 8);
    assert_eq!(out["created"]["joined_rows"], 8);
    assert!(temp_dir.path().join("data/solar_panel.parquet").exists());
}

#[test]
fn test_list_returns_every_record() {
    let temp_dir = seeded("12");

    let out = run_ok(temp_dir.path(), &["list"]);
    let records = out.as_array().unwrap();

    assert_eq!(records.len(), 12);
    assert_eq!(records[0]["id"], 1);

    let online = run_ok(temp_dir.path(), &["list", "--online"]);
    assert_eq!(online, out);
}

#[test]
fn test_get_and_missing_id() {
    let temp_dir = seeded("3");

    let out = run_ok(temp_dir.path(), &["get", "2"]);
    assert_eq!(out["id"], 2);

    let output = run(temp_dir.path(), &["get", "99"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_NOT_FOUND"), "stderr: {}", stderr);
}

#[test]
fn test_page_metadata() {
    let temp_dir = seeded("25");

    let out = run_ok(temp_dir.path(), &["page", "--limit", "10", "--page", "3"]);

    assert_eq!(out["records"].as_array().unwrap().len(), 5);
    assert_eq!(out["total_records"], 25);
    assert_eq!(out["previous_page"], 2);
    assert!(out["next_page"].is_null());
}

#[test]
fn test_page_zero_limit_fails() {
    let temp_dir = seeded("2");

    let output = run(temp_dir.path(), &["page", "--limit", "0"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_ARGUMENT"));
}

#[test]
fn test_update_then_get() {
    let temp_dir = seeded("4");

    let out = run_ok(
        temp_dir.path(),
        &["update", "3", "--status", "Fault", "--latitude", "-12.5"],
    );
    assert_eq!(out["id"], 3);
    assert_eq!(out["status"], "Fault");
    assert_eq!(out["latitude"], -12.5);

    let reread = run_ok(temp_dir.path(), &["get", "3"]);
    assert_eq!(reread, out);
}

#[test]
fn test_update_json_payload_cannot_change_id() {
    let temp_dir = seeded("2");

    let out = run_ok(
        temp_dir.path(),
        &["update", "1", "--json", r#"{"id": 50, "voltage": 301.0}"#],
    );

    assert_eq!(out["id"], 1);
    assert_eq!(out["voltage"], 301.0);
}

#[test]
fn test_delete_and_purge() {
    let temp_dir = seeded("3");

    run_ok(temp_dir.path(), &["delete", "2"]);
    let ids: Vec<i64> = run_ok(temp_dir.path(), &["list"])
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);

    let out = run_ok(temp_dir.path(), &["purge"]);
    assert_eq!(out["purged"], true);

    let output = run(temp_dir.path(), &["list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_SNAPSHOT_NOT_FOUND"));

    let out = run_ok(temp_dir.path(), &["purge"]);
    assert_eq!(out["purged"], false);
}

#[test]
fn test_config_file_sets_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("panelstore.toml");
    std::fs::write(&config_path, "extension = \"pq\"\n").unwrap();

    run_ok(
        temp_dir.path(),
        &[
            "--config",
            config_path.to_str().unwrap(),
            "generate",
            "--rows",
            "2",
            "--create",
        ],
    );

    assert!(temp_dir.path().join("data/solar_panel.pq").exists());
}
