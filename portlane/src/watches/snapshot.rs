//! Watch tables as exchanged in JSON.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use super::{
    PathSessions, SessionPaths, WatchesPathReport, WatchesReport, WatchesSummary,
};
use crate::Result;

/// Both watch tables of a server at one instant.
///
/// The JSON form maps each kind of watch to `path -> [session ids]`; either
/// kind may be omitted.
///
/// ```json
/// { "data": { "/a": [1, 2] }, "child": { "/b": [2] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSnapshot {
    /// Data watches by path.
    #[serde(default)]
    pub data: PathSessions,

    /// Child watches by path, without the trailing `/`.
    #[serde(default)]
    pub child: PathSessions,
}

impl WatchSnapshot {
    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the text is not a valid snapshot.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a JSON error if
    /// it is not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Sessions watching each path.
    #[must_use]
    pub fn path_report(&self) -> WatchesPathReport {
        WatchesPathReport::new(&self.data, &self.child)
    }

    /// Paths watched by each session.
    #[must_use]
    pub fn session_report(&self) -> WatchesReport {
        WatchesReport::new(&invert(&self.data), &invert(&self.child))
    }

    /// Counts for data watches only.
    #[must_use]
    pub fn data_summary(&self) -> WatchesSummary {
        summarize(&self.data)
    }

    /// Counts for child watches only.
    #[must_use]
    pub fn child_summary(&self) -> WatchesSummary {
        summarize(&self.child)
    }

    /// Counts for both kinds of watch together.
    #[must_use]
    pub fn summary(&self) -> WatchesSummary {
        WatchesSummary::combine(&self.data_summary(), &self.child_summary())
    }

    /// Per-kind counts alongside the combined counts.
    #[must_use]
    pub fn summary_report(&self) -> WatchesSummaryReport {
        WatchesSummaryReport {
            data: self.data_summary(),
            child: self.child_summary(),
        }
    }
}

/// Data and child watch counts, reported side by side.
///
/// Displays as two blocks, one per kind of watch; serializes as the
/// combined [`WatchesSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchesSummaryReport {
    /// Data watch counts.
    pub data: WatchesSummary,
    /// Child watch counts.
    pub child: WatchesSummary,
}

impl WatchesSummaryReport {
    /// The combined counts.
    #[must_use]
    pub const fn combined(&self) -> WatchesSummary {
        WatchesSummary::combine(&self.data, &self.child)
    }
}

impl Serialize for WatchesSummaryReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.combined().serialize(serializer)
    }
}

impl fmt::Display for WatchesSummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data watches")?;
        writeln!(f, "{}", self.data)?;
        writeln!(f, "Children watches")?;
        write!(f, "{}", self.child)
    }
}

fn invert(table: &PathSessions) -> SessionPaths {
    let mut sessions = SessionPaths::new();
    for (path, ids) in table {
        for id in ids {
            sessions.entry(*id).or_default().insert(path.clone());
        }
    }
    sessions
}

fn summarize(table: &PathSessions) -> WatchesSummary {
    let connections: BTreeSet<_> = table.values().flatten().collect();
    let watches = table.values().map(BTreeSet::len).sum();
    WatchesSummary::new(connections.len(), table.len(), watches)
}
