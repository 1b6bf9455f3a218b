//! Common test utilities for integration tests.
//!
//! This module provides environment guards, range helpers and watch
//! snapshot fixtures shared by the portlane integration tests.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use portlane::config::{
    BIND_ADDRESS_ENV, COMMAND_LINE_ENV, CONFIG_FILE_ENV, PROCESS_COUNT_ENV,
};
use portlane::PortRange;

/// RAII guard for setting and restoring environment variables.
///
/// Tests using environment variables must be marked `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Sets `key` to `value` until the guard is dropped.
    pub fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Removes `key` until the guard is dropped.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clears every `PORTLANE_*` configuration variable for the guard's lifetime.
#[allow(dead_code)]
pub fn clear_portlane_env_vars() -> Vec<EnvGuard> {
    [
        PROCESS_COUNT_ENV,
        COMMAND_LINE_ENV,
        BIND_ADDRESS_ENV,
        CONFIG_FILE_ENV,
    ]
    .iter()
    .map(|k| EnvGuard::remove(k))
    .collect()
}

/// Shorthand for a range that is known to be valid.
#[allow(dead_code)]
pub fn range(min: u16, max: u16) -> PortRange {
    PortRange::from_bounds(min, max).expect("test range bounds are valid")
}

/// Writes `content` to `dir/filename` and returns the path.
#[allow(dead_code)]
pub fn create_temp_file(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// Watch snapshot with two sessions, each holding two data watches and two
/// child watches on distinct nodes.
#[allow(dead_code)]
pub const TWO_SESSION_SNAPSHOT: &str = r#"{
    "data": {"/1": [1], "/2": [1], "/5": [2], "/6": [2]},
    "child": {"/3": [1], "/4": [1], "/7": [2], "/8": [2]}
}"#;
