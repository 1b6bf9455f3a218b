//! Allocate command implementation.
//!
//! Runs the sequential allocator over this worker's range and prints the
//! ports it returns. The ports are released when the command exits, so the
//! output is only a hint for whoever binds next.

use crate::error::CliError;
use crate::utils::{load_configuration, print_rendered, GlobalOptions};
use clap::Args;
use portlane::output::OutputFormat;
use portlane::Port;
use serde::Serialize;
use std::fmt;

/// Allocate bindable ports from this worker's range.
#[derive(Args)]
pub struct AllocateCommand {
    /// Number of ports to allocate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Output format (human, json, yaml)
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Ports in allocation order.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Allocation(pub Vec<Port>);

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for port in &self.0 {
            writeln!(f, "{port}")?;
        }
        Ok(())
    }
}

impl AllocateCommand {
    /// Execute the allocate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.count == 0 {
            return Err(CliError::InvalidArguments(
                "count must be at least 1".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let allocator = config.build_allocator();
        log::debug!("allocating {} port(s) from {}", self.count, allocator.range());

        let ports = allocator.allocate_many(self.count)?;
        print_rendered(&Allocation(ports), self.format)
    }
}
