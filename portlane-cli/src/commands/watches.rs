//! Watches command implementation.
//!
//! Reads a JSON watch snapshot and prints one of its reports.

use crate::error::CliError;
use crate::utils::{print_rendered, GlobalOptions};
use clap::{Args, ValueEnum};
use portlane::output::OutputFormat;
use portlane::watches::WatchSnapshot;
use std::path::PathBuf;

/// Which report to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WatchView {
    /// Sessions watching each path
    Paths,
    /// Paths watched by each session
    Sessions,
    /// Connection, path and watch counts
    Summary,
}

/// Render a report from a watch snapshot.
#[derive(Args)]
pub struct WatchesCommand {
    /// JSON snapshot file ({"data": {...}, "child": {...}})
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Report to print
    #[arg(long, value_enum, default_value_t = WatchView::Summary)]
    pub view: WatchView,

    /// Output format (human, json, yaml)
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

impl WatchesCommand {
    /// Execute the watches command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let snapshot = WatchSnapshot::load(&self.snapshot)?;

        match self.view {
            WatchView::Paths => print_rendered(&snapshot.path_report(), self.format),
            WatchView::Sessions => print_rendered(&snapshot.session_report(), self.format),
            WatchView::Summary => print_rendered(&snapshot.summary_report(), self.format),
        }
    }
}
