//! Common test utilities for CLI integration tests.
//!
//! Every command built here starts from a clean environment so a
//! developer's `PORTLANE_*` variables cannot leak into assertions.

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PORTLANE_VARS: [&str; 5] = [
    "PORTLANE_PROCESS_COUNT",
    "PORTLANE_COMMAND_LINE",
    "PORTLANE_BIND_ADDRESS",
    "PORTLANE_CONFIG",
    "PORTLANE_LOG_MODE",
];

/// Test environment with a scratch directory for config and snapshot files.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// A `portlane` command with all `PORTLANE_*` variables removed.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("portlane").expect("Failed to find portlane binary");
        for var in PORTLANE_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Writes a file into the scratch directory and returns its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

/// Watch snapshot with two sessions, each holding two data watches and two
/// child watches.
#[allow(dead_code)]
pub const TWO_SESSION_SNAPSHOT: &str = r#"{
    "data": {"/1": [1], "/2": [1], "/5": [2], "/6": [2]},
    "child": {"/3": [1], "/4": [1], "/7": [2], "/8": [2]}
}"#;
