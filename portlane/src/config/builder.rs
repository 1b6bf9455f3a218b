//! Layered configuration assembly.

use std::env;
use std::path::PathBuf;

use crate::config::environment::{EnvironmentConfig, CONFIG_FILE_ENV};
use crate::config::loader::ConfigLoader;
use crate::config::schema::Config;
use crate::error::Result;

/// Builds a [`Config`] from defaults, a file, the environment and explicit
/// overrides, in increasing order of precedence.
///
/// When no layer supplies a command line, the current process arguments
/// joined by spaces are used, so a worker launched as
/// `runner threadid=3` finds its index without extra setup.
///
/// # Examples
///
/// ```
/// use portlane::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .skip_process_args()
///     .with_config(Config {
///         process_count: Some("2".into()),
///         command_line: Some("threadid=2".into()),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.port_range().to_string(), "38378-65534");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
    skip_process_args: bool,
}

impl ConfigBuilder {
    /// Creates a builder with every layer enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads this YAML file instead of the one named by `PORTLANE_CONFIG`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Applies `config` on top of every other layer.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `PORTLANE_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Does not fall back to the process arguments for the command line.
    #[must_use]
    pub fn skip_process_args(mut self) -> Self {
        self.skip_process_args = true;
        self
    }

    /// Assembles the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed,
    /// or if an environment variable holds an invalid bind address.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            if let Some(path) = self.config_file() {
                log::debug!("loading configuration from {}", path.display());
                config.merge(ConfigLoader::load_file(&path)?);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = self.overrides {
            config.merge(overrides);
        }

        if config.command_line.is_none() && !self.skip_process_args {
            config.command_line = Some(env::args().collect::<Vec<_>>().join(" "));
        }

        Ok(config)
    }

    fn config_file(&self) -> Option<PathBuf> {
        if self.file.is_some() {
            return self.file.clone();
        }
        if self.skip_env {
            return None;
        }
        env::var_os(CONFIG_FILE_ENV).map(PathBuf::from)
    }
}
