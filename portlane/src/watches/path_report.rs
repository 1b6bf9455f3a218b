//! Watches keyed by path.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use super::{child_key, PathSessions, SessionId, CHILD_SUFFIX};

/// Sessions watching each path.
///
/// Child-watch paths carry a trailing `/`. Querying `"/a"` looks at data
/// watches on `/a`; querying `"/a/"` looks at child watches on `/a`.
///
/// # Examples
///
/// ```
/// use portlane::watches::{PathSessions, WatchesPathReport};
///
/// let mut data = PathSessions::new();
/// data.insert("/config".into(), [7].into());
/// let report = WatchesPathReport::new(&data, &PathSessions::new());
///
/// assert!(report.has_sessions("/config"));
/// assert!(!report.has_sessions("/config/"));
/// assert!(report.sessions("/config").unwrap().contains(&7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchesPathReport {
    data: PathSessions,
    child: PathSessions,
}

impl WatchesPathReport {
    /// Copies the two watch tables into a report.
    #[must_use]
    pub fn new(data: &PathSessions, child: &PathSessions) -> Self {
        Self {
            data: data.clone(),
            child: child
                .iter()
                .map(|(path, ids)| (child_key(path), ids.clone()))
                .collect(),
        }
    }

    /// Returns `true` if any session watches `path`.
    #[must_use]
    pub fn has_sessions(&self, path: &str) -> bool {
        self.table_for(path).contains_key(path)
    }

    /// Sessions watching `path`, or `None` if nobody does.
    #[must_use]
    pub fn sessions(&self, path: &str) -> Option<&BTreeSet<SessionId>> {
        self.table_for(path).get(path)
    }

    /// Every watched path, data and child, with its sessions.
    #[must_use]
    pub fn to_map(&self) -> PathSessions {
        let mut map = self.data.clone();
        map.extend(self.child.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }

    /// Number of distinct entries in [`Self::to_map`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() + self.child.len()
    }

    /// Returns `true` if nothing is watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.child.is_empty()
    }

    fn table_for(&self, path: &str) -> &PathSessions {
        if path.ends_with(CHILD_SUFFIX) {
            &self.child
        } else {
            &self.data
        }
    }
}

impl Serialize for WatchesPathReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl fmt::Display for WatchesPathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, ids) in self.to_map() {
            writeln!(f, "{path}")?;
            for id in ids {
                writeln!(f, "\t0x{id:x}")?;
            }
        }
        Ok(())
    }
}
