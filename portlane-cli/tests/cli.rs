//! Integration tests for the portlane CLI.
//!
//! These tests run the built binary and check its output and exit codes.

mod common;

use common::{TestEnv, TWO_SESSION_SNAPSHOT};
use predicates::prelude::*;

#[test]
fn test_cli_no_arguments() {
    let env = TestEnv::new();
    env.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version_flag() {
    let env = TestEnv::new();
    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("portlane"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_help_flag() {
    let env = TestEnv::new();
    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("collision-free test ports"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let env = TestEnv::new();
    env.command()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ============================================================================
// range
// ============================================================================

#[test]
fn test_range_unpartitioned() {
    let env = TestEnv::new();
    env.command()
        .arg("range")
        .assert()
        .success()
        .stdout("11221-65535\n");
}

#[test]
fn test_range_from_flags() {
    let env = TestEnv::new();
    env.command()
        .args(["--process-count", "8", "--command-line", "threadid=8", "range"])
        .assert()
        .success()
        .stdout("58744-65532\n");
}

#[test]
fn test_range_from_environment() {
    let env = TestEnv::new();
    env.command()
        .env("PORTLANE_PROCESS_COUNT", "2")
        .env("PORTLANE_COMMAND_LINE", "runner threadid=2")
        .arg("range")
        .assert()
        .success()
        .stdout("38378-65534\n");
}

#[test]
fn test_range_flags_beat_config_file() {
    let env = TestEnv::new();
    let config = env.write_file("portlane.yaml", "process_count: 8\ncommand_line: threadid=1\n");
    env.command()
        .arg("--config")
        .arg(&config)
        .args(["--process-count", "2", "range", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min\": 11221"))
        .stdout(predicate::str::contains("\"max\": 38377"));
}

#[test]
fn test_range_bad_config_file() {
    let env = TestEnv::new();
    let config = env.write_file("portlane.yaml", "ports: [1, 2]\n");
    env.command()
        .arg("--config")
        .arg(&config)
        .arg("range")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_range_bad_format() {
    let env = TestEnv::new();
    env.command()
        .args(["range", "--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
}

// ============================================================================
// allocate
// ============================================================================

#[test]
fn test_allocate_json() {
    let env = TestEnv::new();
    let output = env
        .command()
        .args(["--process-count", "8", "--command-line", "threadid=3"])
        .args(["allocate", "-n", "3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let ports: Vec<u16> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ports.len(), 3);
    assert!(ports.iter().all(|p| (24799..=31587).contains(p)));
    assert!(ports.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_allocate_zero_is_invalid() {
    let env = TestEnv::new();
    env.command()
        .args(["allocate", "-n", "0"])
        .assert()
        .code(4);
}

#[test]
fn test_allocate_logs_assignment_when_verbose() {
    let env = TestEnv::new();
    env.command()
        .args(["--verbose", "allocate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("assigning port"));
}

// ============================================================================
// partition
// ============================================================================

#[test]
fn test_partition_table() {
    let env = TestEnv::new();
    env.command()
        .args(["partition", "--process-count", "2"])
        .assert()
        .success()
        .stdout("worker 1: 11221-38377\nworker 2: 38378-65534\n");
}

#[test]
fn test_partition_json() {
    let env = TestEnv::new();
    let output = env
        .command()
        .args(["--process-count", "8", "partition", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[7]["worker"], 8);
    assert_eq!(rows[7]["min"], 58744);
    assert_eq!(rows[7]["max"], 65532);
}

#[test]
fn test_partition_requires_count() {
    let env = TestEnv::new();
    env.command()
        .arg("partition")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--process-count"));
}

#[test]
fn test_partition_rejects_garbage_count() {
    let env = TestEnv::new();
    env.command()
        .args(["partition", "--process-count", "lots"])
        .assert()
        .code(4);
}

// ============================================================================
// watches
// ============================================================================

#[test]
fn test_watches_summary() {
    let env = TestEnv::new();
    let snapshot = env.write_file("watches.json", TWO_SESSION_SNAPSHOT);
    env.command()
        .arg("watches")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(
            "Data watches\n\
             2 connections watching 4 paths\n\
             Total watches:4\n\
             Children watches\n\
             2 connections watching 4 paths\n\
             Total watches:4\n",
        );
}

#[test]
fn test_watches_paths_view() {
    let env = TestEnv::new();
    let snapshot = env.write_file("watches.json", r#"{"data": {"/a": [10]}, "child": {"/a": [11]}}"#);
    env.command()
        .arg("watches")
        .arg(&snapshot)
        .args(["--view", "paths"])
        .assert()
        .success()
        .stdout("/a\n\t0xa\n/a/\n\t0xb\n");
}

#[test]
fn test_watches_sessions_json() {
    let env = TestEnv::new();
    let snapshot = env.write_file("watches.json", TWO_SESSION_SNAPSHOT);
    let output = env
        .command()
        .arg("watches")
        .arg(&snapshot)
        .args(["--view", "sessions", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let sessions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sessions["1"], serde_json::json!(["/1", "/2", "/3/", "/4/"]));
}

#[test]
fn test_watches_missing_file() {
    let env = TestEnv::new();
    env.command()
        .args(["watches", "/nonexistent/watches.json"])
        .assert()
        .code(5);
}

#[test]
fn test_watches_invalid_json() {
    let env = TestEnv::new();
    let snapshot = env.write_file("watches.json", "{ not json");
    env.command()
        .arg("watches")
        .arg(&snapshot)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("JSON error"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();
    env.command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("portlane"));
}
