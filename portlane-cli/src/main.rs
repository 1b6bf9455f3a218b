//! Main entry point for the portlane CLI.
//!
//! This is the command-line interface for partitioned port allocation:
//! - `range`: Show this worker's slice of the global test port range
//! - `allocate`: Hand out bindable ports from that slice
//! - `partition`: Show every worker's slice for a process count
//! - `watches`: Render watch snapshot reports
//! - `completions`: Generate shell completions

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Route library log records to stderr
    portlane::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        process_count: cli.process_count,
        command_line: cli.command_line,
    };

    let result = match cli.command {
        cli::Command::Range(cmd) => cmd.execute(&global),
        cli::Command::Allocate(cmd) => cmd.execute(&global),
        cli::Command::Partition(cmd) => cmd.execute(&global),
        cli::Command::Watches(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
