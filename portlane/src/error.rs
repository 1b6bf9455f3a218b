//! Error types for the portlane library.
//!
//! Partitioning never fails: bad worker coordinates degrade to the whole
//! global range. The errors here come from allocation, configuration loading
//! and report decoding.

use thiserror::Error;

use crate::port::PortRange;

/// Result type alias for operations that may fail with a portlane error.
///
/// # Examples
///
/// ```
/// use portlane::{Error, Result};
///
/// fn first_port() -> Result<u16> {
///     Ok(11222)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the portlane library.
#[derive(Debug, Error)]
pub enum Error {
    /// Every port of the worker's range failed the bind probe.
    ///
    /// Retrying against the same range cannot succeed, so callers should
    /// treat this as a hard test-infrastructure failure.
    #[error(
        "could not assign port from range {range}; the number of parallel test \
         processes may be too large for the available ports"
    )]
    RangeExhausted {
        /// The range that was scanned.
        range: PortRange,
    },

    /// An invalid port number was provided.
    #[error("invalid port {value}: {reason}")]
    InvalidPort {
        /// The invalid port value.
        value: u16,
        /// The reason the port is invalid.
        reason: String,
    },

    /// An invalid port range was specified.
    #[error("invalid port range {min}-{max}: {reason}")]
    InvalidPortRange {
        /// The minimum port in the range.
        min: u16,
        /// The maximum port in the range.
        max: u16,
        /// The reason the range is invalid.
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field or environment variable that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A YAML configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON document (watch snapshot or rendered output) failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<crate::port::InvalidPortError> for Error {
    fn from(err: crate::port::InvalidPortError) -> Self {
        Self::InvalidPort {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::port::InvalidPortRangeError> for Error {
    fn from(err: crate::port::InvalidPortRangeError) -> Self {
        Self::InvalidPortRange {
            min: err.min.value(),
            max: err.max.value(),
            reason: err.reason,
        }
    }
}

impl Error {
    /// Returns `true` if this is a range exhaustion failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use portlane::{Error, PortRange};
    ///
    /// let range = PortRange::from_bounds(11221, 11221).unwrap();
    /// assert!(Error::RangeExhausted { range }.is_exhausted());
    /// ```
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::RangeExhausted { .. })
    }
}
