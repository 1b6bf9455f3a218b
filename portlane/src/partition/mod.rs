//! Per-process partitioning of the global test port range.
//!
//! Parallel test runs start several worker processes, each told how many
//! workers exist and which one it is. Every worker derives its own slice of
//! [`GLOBAL_RANGE`] from those two facts, so workers never hand out the same
//! port even though they share no state.
//!
//! The coordinates arrive as plain strings: a worker count (for example from
//! an environment variable) and the worker's raw command line, which carries
//! a `threadid=<n>` token. Anything missing or malformed means "not
//! partitioned" and the worker owns the whole global range.
//!
//! # Examples
//!
//! ```
//! use portlane::partition::compute_range;
//!
//! let range = compute_range(Some("8"), Some("java -Dfoo threadid=1 Runner"));
//! assert_eq!(range.to_string(), "11221-18009");
//!
//! let whole = compute_range(None, None);
//! assert_eq!(whole.to_string(), "11221-65535");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::{Port, PortRange};

/// Lowest port any worker may allocate.
pub const GLOBAL_BASE: u16 = 11221;

/// Highest port any worker may allocate.
pub const GLOBAL_MAX: u16 = 65535;

/// The full interval shared by all workers.
pub const GLOBAL_RANGE: PortRange = match PortRange::checked(GLOBAL_BASE, GLOBAL_MAX) {
    Some(range) => range,
    None => panic!("global port range bounds are inverted"),
};

/// Token that marks the worker index on the command line.
pub const WORKER_TOKEN: &str = "threadid";

static WORKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{WORKER_TOKEN}=(\d+)")).expect("worker token pattern is valid")
});

/// A worker's position among its sibling processes.
///
/// Values are kept exactly as parsed; [`WorkerIdentity::range`] decides what
/// to do with coordinates that make no sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerIdentity {
    process_count: i64,
    worker_index: i64,
}

impl WorkerIdentity {
    /// Creates an identity from already-parsed coordinates.
    #[must_use]
    pub const fn new(process_count: i64, worker_index: i64) -> Self {
        Self {
            process_count,
            worker_index,
        }
    }

    /// Parses an identity from the raw configuration strings.
    ///
    /// Returns `None` unless the count parses as an integer *and* the command
    /// line contains a `threadid=<digits>` token whose digits fit in an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use portlane::partition::WorkerIdentity;
    ///
    /// let id = WorkerIdentity::from_strings(Some("4"), Some("runner threadid=3")).unwrap();
    /// assert_eq!(id.process_count(), 4);
    /// assert_eq!(id.worker_index(), 3);
    ///
    /// assert!(WorkerIdentity::from_strings(Some("4"), Some("runner")).is_none());
    /// assert!(WorkerIdentity::from_strings(Some(""), Some("threadid=3")).is_none());
    /// ```
    #[must_use]
    pub fn from_strings(process_count: Option<&str>, command_line: Option<&str>) -> Option<Self> {
        let process_count = parse_process_count(process_count)?;
        let worker_index = parse_worker_index(command_line)?;
        Some(Self::new(process_count, worker_index))
    }

    /// Number of sibling worker processes.
    #[must_use]
    pub const fn process_count(&self) -> i64 {
        self.process_count
    }

    /// This worker's 1-based index.
    #[must_use]
    pub const fn worker_index(&self) -> i64 {
        self.worker_index
    }

    /// Returns `true` if this identity actually splits the global range.
    #[must_use]
    pub const fn is_partitioned(&self) -> bool {
        self.process_count > 1
    }

    /// Computes the slice of [`GLOBAL_RANGE`] owned by this worker.
    ///
    /// Each worker gets `(GLOBAL_MAX - GLOBAL_BASE) / process_count` ports
    /// starting at `GLOBAL_BASE + (worker_index - 1) * size`. The remainder of
    /// that division is never handed to anyone, so the last worker stops a
    /// few ports short of `GLOBAL_MAX`. Existing callers depend on those exact
    /// bounds.
    ///
    /// Coordinates that would produce an empty range or one outside
    /// [`GLOBAL_RANGE`] fall back to the whole global range.
    #[must_use]
    pub fn range(&self) -> PortRange {
        if !self.is_partitioned() {
            return GLOBAL_RANGE;
        }

        let span = i64::from(GLOBAL_MAX) - i64::from(GLOBAL_BASE);
        let size = span / self.process_count;
        let minimum = self
            .worker_index
            .checked_sub(1)
            .and_then(|offset| offset.checked_mul(size))
            .and_then(|offset| offset.checked_add(i64::from(GLOBAL_BASE)));
        let bounds = minimum.map(|minimum| (minimum, minimum + size - 1));

        match bounds.and_then(|(minimum, maximum)| checked_subrange(minimum, maximum)) {
            Some(range) => range,
            None => {
                log::warn!(
                    "worker {} of {} has no valid port partition; using {GLOBAL_RANGE}",
                    self.worker_index,
                    self.process_count
                );
                GLOBAL_RANGE
            }
        }
    }
}

/// Computes this worker's port range from the raw configuration strings.
///
/// Never fails: missing or malformed input yields [`GLOBAL_RANGE`].
#[must_use]
pub fn compute_range(process_count: Option<&str>, command_line: Option<&str>) -> PortRange {
    WorkerIdentity::from_strings(process_count, command_line)
        .map_or(GLOBAL_RANGE, |identity| identity.range())
}

/// Returns the ranges of workers `1..=process_count`, in worker order.
///
/// # Examples
///
/// ```
/// use portlane::partition::partition_table;
///
/// let table = partition_table(2);
/// assert_eq!(table[0].to_string(), "11221-38377");
/// assert_eq!(table[1].to_string(), "38378-65534");
/// ```
#[must_use]
pub fn partition_table(process_count: u32) -> Vec<PortRange> {
    let count = i64::from(process_count);
    (1..=count)
        .map(|index| WorkerIdentity::new(count, index).range())
        .collect()
}

fn parse_process_count(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

fn parse_worker_index(command_line: Option<&str>) -> Option<i64> {
    let captures = WORKER_PATTERN.captures(command_line?)?;
    captures.get(1)?.as_str().parse().ok()
}

fn checked_subrange(minimum: i64, maximum: i64) -> Option<PortRange> {
    if minimum < i64::from(GLOBAL_BASE) || maximum > i64::from(GLOBAL_MAX) || maximum < minimum {
        return None;
    }
    PortRange::new(Port::from_i64(minimum)?, Port::from_i64(maximum)?).ok()
}

#[cfg(test)]
mod proptests;
