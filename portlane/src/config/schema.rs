//! Configuration schema definitions.
//!
//! The configuration carries the two raw strings the partitioner needs plus
//! the address the bind probe uses. The strings are kept raw on purpose:
//! a malformed worker count is not a configuration error, it just means the
//! worker is not partitioned.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::partition::{compute_range, WorkerIdentity};
use crate::port::allocator::SequentialPortAllocator;
use crate::port::probe::TcpBindProbe;
use crate::PortRange;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use portlane::config::Config;
///
/// let config = Config {
///     process_count: Some("8".to_string()),
///     command_line: Some("runner threadid=8".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.port_range().to_string(), "58744-65532");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of parallel worker processes, as text.
    ///
    /// YAML files may write this as a number or a string.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub process_count: Option<String>,

    /// Raw command line holding the worker's `threadid=<n>` token.
    pub command_line: Option<String>,

    /// Address the bind probe binds (defaults to `0.0.0.0`).
    pub bind_address: Option<IpAddr>,
}

impl Config {
    /// Overlays every field that is set in `other` onto `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use portlane::config::Config;
    ///
    /// let mut base = Config {
    ///     process_count: Some("2".into()),
    ///     command_line: Some("threadid=1".into()),
    ///     ..Default::default()
    /// };
    /// base.merge(Config {
    ///     process_count: Some("4".into()),
    ///     ..Default::default()
    /// });
    ///
    /// assert_eq!(base.process_count.as_deref(), Some("4"));
    /// assert_eq!(base.command_line.as_deref(), Some("threadid=1"));
    /// ```
    pub fn merge(&mut self, other: Config) {
        if other.process_count.is_some() {
            self.process_count = other.process_count;
        }
        if other.command_line.is_some() {
            self.command_line = other.command_line;
        }
        if other.bind_address.is_some() {
            self.bind_address = other.bind_address;
        }
    }

    /// The worker identity described by this configuration, if any.
    #[must_use]
    pub fn worker_identity(&self) -> Option<WorkerIdentity> {
        WorkerIdentity::from_strings(self.process_count.as_deref(), self.command_line.as_deref())
    }

    /// The port range this worker owns.
    #[must_use]
    pub fn port_range(&self) -> PortRange {
        compute_range(self.process_count.as_deref(), self.command_line.as_deref())
    }

    /// The bind probe for this configuration.
    #[must_use]
    pub fn probe(&self) -> TcpBindProbe {
        self.bind_address
            .map_or_else(TcpBindProbe::default, TcpBindProbe::new)
    }

    /// Builds an allocator over this worker's range.
    #[must_use]
    pub fn build_allocator(&self) -> SequentialPortAllocator {
        SequentialPortAllocator::with_probe(self.port_range(), self.probe())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.worker_identity() {
            Some(id) if id.is_partitioned() => write!(
                f,
                "worker {} of {}, ports {}",
                id.worker_index(),
                id.process_count(),
                self.port_range()
            ),
            _ => write!(f, "unpartitioned, ports {}", self.port_range()),
        }
    }
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Helper {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Helper>::deserialize(deserializer)?.map(|helper| match helper {
        Helper::Number(n) => n.to_string(),
        Helper::Text(s) => s,
    }))
}
