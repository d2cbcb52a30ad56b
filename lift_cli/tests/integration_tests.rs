//! Integration tests for the lift binary.
//!
//! These tests verify end-to-end behavior including:
//! - Achievable-weight preview
//! - Single-outcome adjustment in continuous and inventory mode
//! - Streak simulation
//! - Batch session application and summaries

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("lift"))
}

/// Write a default config and return (dir, path-as-string)
fn setup_config(extra: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, extra).expect("Failed to write config");
    (dir, path.to_string_lossy().into_owned())
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Progressive overload workout assistant",
        ));
}

#[test]
fn test_plates_lists_achievable_weights() {
    let (_dir, config) = setup_config("");

    cli()
        .args(["plates", "--plate", "5x1", "--plate", "10x1"])
        .args(["--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 achievable weights"))
        .stdout(predicate::str::contains("15"));
}

#[test]
fn test_plates_falls_back_to_standard_set() {
    let (_dir, config) = setup_config("");

    cli()
        .args(["plates", "--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("standard plate set"))
        .stdout(predicate::str::contains("2.5"));
}

#[test]
fn test_plates_rejects_malformed_entry() {
    let (_dir, config) = setup_config("");

    cli()
        .args(["plates", "--plate", "abc", "--config", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid plate"));
}

#[test]
fn test_next_increments_on_success() {
    let (_dir, config) = setup_config("");

    // Default config increments after a single success, by 5
    cli()
        .args(["next", "--weight", "100", "--outcome", "success"])
        .args(["--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("100 -> 105"));
}

#[test]
fn test_next_json_output() {
    let (_dir, config) = setup_config("");

    let output = cli()
        .args(["next", "--weight", "100", "--outcome", "success", "--json"])
        .args(["--config", &config])
        .output()
        .expect("Failed to run lift");
    assert!(output.status.success());

    let applied: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON output");
    assert_eq!(applied["state"]["current_weight"], 105.0);
    assert_eq!(applied["adjustment"]["trigger"], "increment");
}

#[test]
fn test_next_respects_threshold_from_config() {
    let (_dir, config) = setup_config("[adjustment]\nincrement_after_successes = 3\n");

    cli()
        .args(["next", "--weight", "100", "--outcome", "success"])
        .args(["--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("No change at 100"));
}

#[test]
fn test_next_with_plates_picks_achievable_weight() {
    let (_dir, config) = setup_config("");

    cli()
        .args(["next", "--weight", "45", "--outcome", "success"])
        .args(["--plate", "45x2", "--plate", "25x1", "--plate", "10x1"])
        .args(["--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("45 -> 55"));
}

#[test]
fn test_next_rejects_zero_tolerance_config() {
    let (_dir, config) = setup_config("[adjustment]\nrounding_tolerance = 0.0\n");

    cli()
        .args(["next", "--weight", "100", "--outcome", "success"])
        .args(["--config", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance"));
}

#[test]
fn test_simulate_trajectory() {
    let (_dir, config) = setup_config("");

    // Defaults: +5 per success, cut to 50% (rounded up to 5) per failure
    cli()
        .args(["simulate", "--weight", "100", "ssf"])
        .args(["--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1: success -> 105"))
        .stdout(predicate::str::contains("#2: success -> 110"))
        .stdout(predicate::str::contains("#3: failure -> 55"))
        .stdout(predicate::str::contains("Final: 55"));
}

#[test]
fn test_session_batch_updates_states() {
    let (_dir, config) = setup_config("");
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("session.json");

    let input = serde_json::json!({
        "performed_at": "2024-06-12T15:00:00Z",
        "total_seconds": 1800.0,
        "exercises": [
            {
                "exercise": {
                    "id": "6f8d1f6e-32e5-4e0f-9b1a-0e2c8a1a9d01",
                    "name": "Bench Press",
                    "reps": 10,
                    "set_count": 3,
                    "state": { "current_weight": 100.0 }
                },
                "sets": [
                    { "state": "success", "reps": 10 },
                    { "state": "success", "reps": 10 },
                    { "state": "success", "reps": 10 }
                ]
            },
            {
                "exercise": {
                    "id": "6f8d1f6e-32e5-4e0f-9b1a-0e2c8a1a9d02",
                    "name": "Row",
                    "reps": 8,
                    "set_count": 2,
                    "state": { "current_weight": 50.0 }
                },
                "sets": [
                    { "state": "success", "reps": 8 },
                    { "state": "failure", "reps": 4 }
                ]
            }
        ]
    });
    fs::write(&input_path, serde_json::to_string_pretty(&input).unwrap()).unwrap();

    let output = cli()
        .args(["session", input_path.to_str().unwrap()])
        .args(["--config", &config])
        .output()
        .expect("Failed to run lift");
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON output");

    // Bench: all sets succeeded -> 100 + 5 = 105
    assert_eq!(
        parsed["exercises"][0]["exercise"]["state"]["current_weight"],
        105.0
    );
    // Row: one failed set -> failure -> cut to 50% of 50 = 25
    assert_eq!(
        parsed["exercises"][1]["exercise"]["state"]["current_weight"],
        25.0
    );

    // Session result snapshots the performed weights and overall outcome
    assert_eq!(parsed["session"]["overall_success"], false);
    assert_eq!(parsed["session"]["exercises"][0]["weight"], 100.0);
    assert_eq!(parsed["session"]["exercises"][1]["failed_reps"][0], 4);
}

#[test]
fn test_session_reads_stdin() {
    let (_dir, config) = setup_config("");

    let input = serde_json::json!({
        "exercises": [
            {
                "exercise": {
                    "id": "6f8d1f6e-32e5-4e0f-9b1a-0e2c8a1a9d03",
                    "name": "Press",
                    "reps": 5,
                    "set_count": 1,
                    "state": { "current_weight": 60.0 }
                },
                "sets": [ { "state": "success", "reps": 5 } ]
            }
        ]
    });

    cli()
        .args(["session", "-", "--config", &config])
        .write_stdin(serde_json::to_string(&input).unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current_weight\": 65.0"));
}

#[test]
fn test_summary_totals_volume() {
    let (_dir, config) = setup_config("");
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("results.json");

    let results = serde_json::json!([
        {
            "id": "6f8d1f6e-32e5-4e0f-9b1a-0e2c8a1a9d10",
            "performed_at": "2024-06-12T15:00:00Z",
            "total_seconds": 1800.0,
            "overall_success": true,
            "exercises": [
                {
                    "id": "6f8d1f6e-32e5-4e0f-9b1a-0e2c8a1a9d11",
                    "name": "Bench Press",
                    "weight": 100.0,
                    "succeeded": true,
                    "failed_reps": [],
                    "sets_at_time": 3,
                    "reps_at_time": 10
                }
            ]
        }
    ]);
    fs::write(&input_path, serde_json::to_string(&results).unwrap()).unwrap();

    cli()
        .args(["summary", input_path.to_str().unwrap()])
        .args(["--window", "all", "--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions: 1"))
        .stdout(predicate::str::contains("Total volume: 3000"));
}
