//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `range`: Print this worker's port range
//! - `allocate`: Allocate bindable ports
//! - `partition`: Print every worker's range
//! - `watches`: Render watch snapshot reports
//! - `completions`: Generate shell completion scripts

pub mod allocate;
pub mod completions;
pub mod partition;
pub mod range;
pub mod watches;

pub use allocate::AllocateCommand;
pub use completions::CompletionsCommand;
pub use partition::PartitionCommand;
pub use range::RangeCommand;
pub use watches::WatchesCommand;
