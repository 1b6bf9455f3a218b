//! Partition command implementation.
//!
//! Shows how the global range is split for a given number of workers,
//! using the global `--process-count` flag (or the configured count).

use crate::error::CliError;
use crate::utils::{load_configuration, print_rendered, GlobalOptions};
use clap::Args;
use portlane::output::OutputFormat;
use portlane::partition::partition_table;
use portlane::PortRange;
use serde::Serialize;
use std::fmt;

/// Print the range of every worker for a process count.
#[derive(Args)]
pub struct PartitionCommand {
    /// Output format (human, json, yaml)
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// One worker's slice of the global range.
#[derive(Debug, Serialize)]
pub struct PartitionRow {
    /// 1-based worker index.
    pub worker: u32,
    /// Lowest port of the slice.
    pub min: u16,
    /// Highest port of the slice.
    pub max: u16,
}

/// Every worker's slice, in worker order.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct PartitionTable(pub Vec<PartitionRow>);

impl PartitionTable {
    /// Builds the table for `process_count` workers.
    pub fn new(process_count: u32) -> Self {
        let rows = (1..)
            .zip(partition_table(process_count))
            .map(|(worker, range): (u32, PortRange)| PartitionRow {
                worker,
                min: range.min().value(),
                max: range.max().value(),
            })
            .collect();
        Self(rows)
    }
}

impl fmt::Display for PartitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            writeln!(f, "worker {}: {}-{}", row.worker, row.min, row.max)?;
        }
        Ok(())
    }
}

impl PartitionCommand {
    /// Execute the partition command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let raw = config.process_count.ok_or_else(|| {
            CliError::InvalidArguments("--process-count is required".to_string())
        })?;
        let process_count: u32 = raw.trim().parse().map_err(|_| {
            CliError::InvalidArguments(format!("invalid process count '{raw}'"))
        })?;
        if process_count == 0 {
            return Err(CliError::InvalidArguments(
                "process count must be at least 1".to_string(),
            ));
        }

        print_rendered(&PartitionTable::new(process_count), self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_worker_table() {
        let table = PartitionTable::new(2);
        assert_eq!(
            table.to_string(),
            "worker 1: 11221-38377\nworker 2: 38378-65534\n"
        );
    }

    #[test]
    fn test_single_worker_table() {
        let table = PartitionTable::new(1);
        assert_eq!(table.0.len(), 1);
        assert_eq!(table.0[0].max, 65535);
    }
}
