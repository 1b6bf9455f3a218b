//! Watches keyed by session.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use super::{child_key, SessionId, SessionPaths};

/// Paths watched by each session.
///
/// Child-watch paths carry a trailing `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchesReport {
    data: SessionPaths,
    child: SessionPaths,
}

impl WatchesReport {
    /// Copies the two per-session tables into a report.
    #[must_use]
    pub fn new(data: &SessionPaths, child: &SessionPaths) -> Self {
        Self {
            data: data.clone(),
            child: child
                .iter()
                .map(|(id, paths)| (*id, paths.iter().map(|p| child_key(p)).collect()))
                .collect(),
        }
    }

    /// Returns `true` if the session holds any watch.
    #[must_use]
    pub fn has_paths(&self, session: SessionId) -> bool {
        self.data.contains_key(&session) || self.child.contains_key(&session)
    }

    /// All paths the session watches, or `None` if it holds no watch.
    ///
    /// # Examples
    ///
    /// ```
    /// use portlane::watches::{SessionPaths, WatchesReport};
    ///
    /// let mut data = SessionPaths::new();
    /// data.insert(1, ["/a".to_string()].into());
    /// let mut child = SessionPaths::new();
    /// child.insert(1, ["/a".to_string()].into());
    ///
    /// let report = WatchesReport::new(&data, &child);
    /// let paths: Vec<_> = report.paths(1).unwrap().into_iter().collect();
    /// assert_eq!(paths, vec!["/a", "/a/"]);
    /// ```
    #[must_use]
    pub fn paths(&self, session: SessionId) -> Option<BTreeSet<String>> {
        let data = self.data.get(&session);
        let child = self.child.get(&session);
        if data.is_none() && child.is_none() {
            return None;
        }
        Some(data.into_iter().chain(child).flatten().cloned().collect())
    }

    /// Every session with all of its paths.
    #[must_use]
    pub fn to_map(&self) -> SessionPaths {
        let mut map = self.data.clone();
        for (id, paths) in &self.child {
            map.entry(*id).or_default().extend(paths.iter().cloned());
        }
        map
    }

    /// Number of sessions holding at least one watch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() + self.child.keys().filter(|id| !self.data.contains_key(id)).count()
    }

    /// Returns `true` if no session holds a watch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.child.is_empty()
    }
}

impl Serialize for WatchesReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl fmt::Display for WatchesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, paths) in self.to_map() {
            writeln!(f, "0x{id:x}")?;
            for path in paths {
                writeln!(f, "\t{path}")?;
            }
        }
        Ok(())
    }
}
