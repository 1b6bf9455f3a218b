//! Environment variable handling for configuration overrides.
//!
//! Test runners usually hand worker coordinates to child processes through
//! the environment, so these variables take precedence over files.

use std::env;
use std::net::IpAddr;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Worker count for the current test run.
pub const PROCESS_COUNT_ENV: &str = "PORTLANE_PROCESS_COUNT";

/// Command line carrying the `threadid=<n>` token.
pub const COMMAND_LINE_ENV: &str = "PORTLANE_COMMAND_LINE";

/// Address the bind probe should use.
pub const BIND_ADDRESS_ENV: &str = "PORTLANE_BIND_ADDRESS";

/// Path of a YAML configuration file.
pub const CONFIG_FILE_ENV: &str = "PORTLANE_CONFIG";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use portlane::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `PORTLANE_*` environment variable overrides to config.
    ///
    /// The worker count and command line are copied verbatim; only the bind
    /// address is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORTLANE_BIND_ADDRESS` is not an IP address.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(count) = env::var(PROCESS_COUNT_ENV) {
            config.process_count = Some(count);
        }

        if let Ok(command_line) = env::var(COMMAND_LINE_ENV) {
            config.command_line = Some(command_line);
        }

        if let Ok(address) = env::var(BIND_ADDRESS_ENV) {
            config.bind_address = Some(Self::parse_address(BIND_ADDRESS_ENV, &address)?);
        }

        Ok(())
    }

    fn parse_address(field: &str, s: &str) -> Result<IpAddr> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Invalid IP address: '{s}'"),
        })
    }
}
