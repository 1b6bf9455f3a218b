#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # portlane
//!
//! Collision-free port allocation for parallel test runs.
//!
//! Test workers in separate processes each take a disjoint slice of the
//! global test port range, then hand out ports from that slice one at a
//! time, checking each candidate with a real bind.
//!
//! ## Core Types
//!
//! - [`Port`] and [`PortRange`]: Network port types with validation
//! - [`partition`]: Per-worker slices of the global range
//! - [`SequentialPortAllocator`]: Thread-safe wrap-around allocation
//! - [`assignment`]: The process-wide allocator behind [`unique`]
//! - [`watches`]: Watch registration reports
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use portlane::{Port, PortRange};
//!
//! // Create a valid port
//! let port = Port::try_from(8080).unwrap();
//! assert_eq!(port.value(), 8080);
//!
//! // Create a port range
//! let min = Port::try_from(5000).unwrap();
//! let max = Port::try_from(5010).unwrap();
//! let range = PortRange::new(min, max).unwrap();
//! assert_eq!(range.len(), 11);
//! ```
//!
//! Allocating from this worker's slice:
//!
//! ```no_run
//! let port = portlane::unique().unwrap();
//! println!("listening on {port}");
//! ```

pub mod assignment;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod partition;
pub mod port;
pub mod watches;

pub use port::allocator;

// Re-export key types at crate root for convenience
pub use allocator::SequentialPortAllocator;
pub use assignment::{global_allocator, unique, unique_port};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use partition::{compute_range, WorkerIdentity, GLOBAL_RANGE};
pub use port::probe::{BindProbe, MockBindProbe, TcpBindProbe};
pub use port::{Port, PortRange};
pub use watches::{WatchSnapshot, WatchesPathReport, WatchesReport, WatchesSummary};
