//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command,
//! configuration loading and output printing.

use crate::error::CliError;
use portlane::output::{render, OutputFormat};
use portlane::{Config, ConfigBuilder};
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Worker count override.
    pub process_count: Option<String>,

    /// Command line override.
    pub command_line: Option<String>,
}

impl GlobalOptions {
    /// The configuration layer contributed by command-line flags.
    pub fn overrides(&self) -> Config {
        Config {
            process_count: self.process_count.clone(),
            command_line: self.command_line.clone(),
            bind_address: None,
        }
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(global.overrides());
    if let Some(path) = &global.config {
        builder = builder.with_file(path);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Render `value` and write it to stdout followed by a newline.
pub fn print_rendered<T>(value: &T, format: OutputFormat) -> Result<(), CliError>
where
    T: Serialize + Display + ?Sized,
{
    let text = render(value, format)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if !text.is_empty() {
        writeln!(handle, "{text}")?;
    }
    Ok(())
}
