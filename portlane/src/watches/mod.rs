//! Reports over a snapshot of watch registrations.
//!
//! A coordination server keeps two kinds of watches: data watches fire when
//! a node's contents change, child watches when its children change. Both
//! are recorded as `path -> sessions`. These types are read-only views of
//! one snapshot of those tables:
//!
//! - [`WatchesPathReport`]: sessions watching each path
//! - [`WatchesReport`]: paths watched by each session
//! - [`WatchesSummary`]: connection, path and watch counts
//!
//! Child watches are always reported with a trailing `/` on the path, so a
//! data watch and a child watch on the same node stay distinguishable.
//!
//! # Examples
//!
//! ```
//! use portlane::watches::WatchSnapshot;
//!
//! let snapshot = WatchSnapshot::from_json(
//!     r#"{"data": {"/a": [1, 2]}, "child": {"/a": [2]}}"#,
//! ).unwrap();
//!
//! let paths = snapshot.path_report();
//! assert!(paths.has_sessions("/a"));
//! assert!(paths.has_sessions("/a/"));
//!
//! let sessions = snapshot.session_report();
//! assert_eq!(sessions.paths(2).unwrap().len(), 2);
//!
//! assert_eq!(snapshot.summary().num_total_watches(), 3);
//! ```

mod path_report;
mod session_report;
mod snapshot;
mod summary;

pub use path_report::WatchesPathReport;
pub use session_report::WatchesReport;
pub use snapshot::{WatchSnapshot, WatchesSummaryReport};
pub use summary::WatchesSummary;

use std::collections::{BTreeMap, BTreeSet};

/// Identifier of a client session.
pub type SessionId = i64;

/// Watched paths mapped to the sessions watching them.
pub type PathSessions = BTreeMap<String, BTreeSet<SessionId>>;

/// Sessions mapped to the paths they watch.
pub type SessionPaths = BTreeMap<SessionId, BTreeSet<String>>;

/// Marker appended to child-watch paths.
pub const CHILD_SUFFIX: char = '/';

pub(crate) fn child_key(path: &str) -> String {
    let mut key = String::with_capacity(path.len() + 1);
    key.push_str(path);
    key.push(CHILD_SUFFIX);
    key
}
