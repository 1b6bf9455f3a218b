//! Watch counts.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Key for the child watch count.
pub const KEY_NUM_CHILD_WATCHES: &str = "num_child_watches";
/// Key for the data watch count.
pub const KEY_NUM_DATA_WATCHES: &str = "num_data_watches";
/// Key for the connection count.
pub const KEY_NUM_CONNECTIONS: &str = "num_connections";
/// Key for the path count.
pub const KEY_NUM_PATHS: &str = "num_paths";
/// Key for the total watch count.
pub const KEY_NUM_TOTAL_WATCHES: &str = "num_total_watches";

/// Connection, path and watch counts for one snapshot.
///
/// A summary built by [`WatchesSummary::new`] describes a single kind of
/// watch and leaves the per-kind counts at zero. [`WatchesSummary::combine`]
/// adds a data summary and a child summary and records each one's total.
///
/// # Examples
///
/// ```
/// use portlane::WatchesSummary;
///
/// let data = WatchesSummary::new(2, 4, 4);
/// let child = WatchesSummary::new(1, 2, 3);
/// let both = WatchesSummary::combine(&data, &child);
///
/// assert_eq!(both.num_connections(), 3);
/// assert_eq!(both.num_data_watches(), 4);
/// assert_eq!(both.num_child_watches(), 3);
/// assert_eq!(both.num_total_watches(), 7);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchesSummary {
    num_child_watches: usize,
    num_data_watches: usize,
    num_connections: usize,
    num_paths: usize,
    num_total_watches: usize,
}

impl WatchesSummary {
    /// Summary of a single kind of watch.
    #[must_use]
    pub const fn new(num_connections: usize, num_paths: usize, num_total_watches: usize) -> Self {
        Self {
            num_child_watches: 0,
            num_data_watches: 0,
            num_connections,
            num_paths,
            num_total_watches,
        }
    }

    /// Sums a data-watch summary and a child-watch summary.
    ///
    /// Connections and paths are added, not deduplicated: a session holding
    /// both kinds of watch counts twice.
    #[must_use]
    pub const fn combine(data: &Self, child: &Self) -> Self {
        Self {
            num_child_watches: child.num_total_watches,
            num_data_watches: data.num_total_watches,
            num_connections: data.num_connections + child.num_connections,
            num_paths: data.num_paths + child.num_paths,
            num_total_watches: data.num_total_watches + child.num_total_watches,
        }
    }

    /// Child watches included in the total.
    #[must_use]
    pub const fn num_child_watches(&self) -> usize {
        self.num_child_watches
    }

    /// Data watches included in the total.
    #[must_use]
    pub const fn num_data_watches(&self) -> usize {
        self.num_data_watches
    }

    /// Connections holding watches.
    #[must_use]
    pub const fn num_connections(&self) -> usize {
        self.num_connections
    }

    /// Watched paths.
    #[must_use]
    pub const fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// All watches.
    #[must_use]
    pub const fn num_total_watches(&self) -> usize {
        self.num_total_watches
    }

    /// The counts as ordered key/value pairs.
    #[must_use]
    pub const fn to_map(&self) -> [(&'static str, usize); 5] {
        [
            (KEY_NUM_CHILD_WATCHES, self.num_child_watches),
            (KEY_NUM_DATA_WATCHES, self.num_data_watches),
            (KEY_NUM_CONNECTIONS, self.num_connections),
            (KEY_NUM_PATHS, self.num_paths),
            (KEY_NUM_TOTAL_WATCHES, self.num_total_watches),
        ]
    }
}

impl Serialize for WatchesSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.to_map();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

impl fmt::Display for WatchesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} connections watching {} paths",
            self.num_connections, self.num_paths
        )?;
        write!(f, "Total watches:{}", self.num_total_watches)
    }
}
