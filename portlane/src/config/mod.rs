//! Configuration system for portlane.
//!
//! A worker learns where it sits in a parallel test run from two strings:
//! the total worker count and a command line carrying a `threadid=<n>`
//! token. This module gathers those strings, plus the address the bind
//! probe uses, from several sources.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PORTLANE_*`)
//! 3. A YAML file (via `ConfigBuilder::with_file` or `PORTLANE_CONFIG`)
//! 4. Built-in defaults
//!
//! If nothing supplies a command line, the arguments of the current process
//! are used.
//!
//! # Examples
//!
//! ```no_run
//! use portlane::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("{config}");
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use portlane::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         process_count: Some("8".to_string()),
//!         command_line: Some("threadid=1".to_string()),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.port_range().to_string(), "11221-18009");
//! ```

mod builder;
mod environment;
mod loader;
mod schema;

pub use builder::ConfigBuilder;
pub use environment::{
    EnvironmentConfig, BIND_ADDRESS_ENV, COMMAND_LINE_ENV, CONFIG_FILE_ENV, PROCESS_COUNT_ENV,
};
pub use loader::ConfigLoader;
pub use schema::Config;
