//! Library exports for portlane-cli.
//!
//! The command tree is exposed so integration tests can inspect it with
//! `clap::CommandFactory`.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
