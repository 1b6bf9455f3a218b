//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AllocateCommand, CompletionsCommand, PartitionCommand, RangeCommand, WatchesCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for partitioned ephemeral port allocation.
#[derive(Parser)]
#[command(name = "portlane")]
#[command(
    version,
    about = "Allocate collision-free test ports across parallel workers",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Load configuration from this YAML file
    #[arg(long, value_name = "PATH", global = true, env = "PORTLANE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of parallel worker processes
    #[arg(long, value_name = "N", global = true)]
    pub process_count: Option<String>,

    /// Command line carrying this worker's threadid=<n> token
    #[arg(long, value_name = "TEXT", global = true, allow_hyphen_values = true)]
    pub command_line: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the port range owned by this worker
    Range(RangeCommand),

    /// Allocate bindable ports from this worker's range
    Allocate(AllocateCommand),

    /// Print the range of every worker for a process count
    Partition(PartitionCommand),

    /// Render a report from a watch snapshot
    Watches(WatchesCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
