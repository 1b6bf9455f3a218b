//! Range command implementation.
//!
//! Prints the slice of the global test port range that this worker owns.

use crate::error::CliError;
use crate::utils::{load_configuration, print_rendered, GlobalOptions};
use clap::Args;
use portlane::output::OutputFormat;

/// Print the port range owned by this worker.
#[derive(Args)]
pub struct RangeCommand {
    /// Output format (human, json, yaml)
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

impl RangeCommand {
    /// Execute the range command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        log::info!("{config}");

        print_rendered(&config.port_range(), self.format)
    }
}
