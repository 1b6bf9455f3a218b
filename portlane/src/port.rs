//! Port and port range types.
//!
//! These are the values the partitioner produces and the allocator hands out.
//! A [`Port`] is never zero, and a [`PortRange`] is never empty.

pub mod allocator;
pub mod probe;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A valid network port number (1-65535).
///
/// Port 0 asks the OS for an arbitrary ephemeral port, so it can never be the
/// result of an allocation and is rejected here.
///
/// # Examples
///
/// ```
/// use portlane::Port;
///
/// let port = Port::try_from(11221).unwrap();
/// assert_eq!(port.value(), 11221);
///
/// assert!(Port::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    /// The minimum valid port number.
    pub const MIN: u16 = 1;

    /// The maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Returns the underlying port number.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Narrows a wide integer to a port, or `None` if it is outside 1-65535.
    #[must_use]
    pub fn from_i64(value: i64) -> Option<Self> {
        u16::try_from(value).ok().filter(|v| *v != 0).map(Self)
    }
}

impl TryFrom<u16> for Port {
    type Error = InvalidPortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(InvalidPortError {
                value: 0,
                reason: "port 0 is reserved for OS assignment".into(),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid port numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPortError {
    /// The rejected value.
    pub value: u16,
    /// Why the value was rejected.
    pub reason: String,
}

impl fmt::Display for InvalidPortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid port {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidPortError {}

/// An inclusive range of ports.
///
/// # Examples
///
/// ```
/// use portlane::{Port, PortRange};
///
/// let range = PortRange::new(
///     Port::try_from(5000).unwrap(),
///     Port::try_from(5010).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(range.len(), 11);
/// assert!(range.contains(Port::try_from(5010).unwrap()));
/// assert!(!range.contains(Port::try_from(4999).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PortRange {
    min: Port,
    max: Port,
}

impl PortRange {
    /// Creates a new port range.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is less than `min`.
    pub fn new(min: Port, max: Port) -> Result<Self, InvalidPortRangeError> {
        if max < min {
            Err(InvalidPortRangeError {
                min,
                max,
                reason: "max must be greater than or equal to min".into(),
            })
        } else {
            Ok(Self { min, max })
        }
    }

    /// Creates a range from raw bounds in a const context.
    ///
    /// Returns `None` if either bound is 0 or `max < min`.
    #[must_use]
    pub const fn checked(min: u16, max: u16) -> Option<Self> {
        if min == 0 || max < min {
            None
        } else {
            Some(Self {
                min: Port(min),
                max: Port(max),
            })
        }
    }

    /// Creates a range from raw bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is 0 or `max < min`.
    pub fn from_bounds(min: u16, max: u16) -> crate::Result<Self> {
        let min = Port::try_from(min)?;
        let max = Port::try_from(max)?;
        Ok(Self::new(min, max)?)
    }

    /// Returns the lowest port in the range.
    #[must_use]
    pub const fn min(&self) -> Port {
        self.min
    }

    /// Returns the highest port in the range.
    #[must_use]
    pub const fn max(&self) -> Port {
        self.max
    }

    /// Returns `true` if the range contains the given port.
    #[must_use]
    pub const fn contains(&self, port: Port) -> bool {
        port.value() >= self.min.value() && port.value() <= self.max.value()
    }

    /// Returns `true` if every port of `self` is also in `other`.
    #[must_use]
    pub const fn is_subset_of(&self, other: &Self) -> bool {
        other.contains(self.min) && other.contains(self.max)
    }

    /// Returns `true` if the two ranges share at least one port.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.min.value() <= other.max.value() && other.min.value() <= self.max.value()
    }

    /// Returns the number of ports in the range.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.max.value() as u32 - self.min.value() as u32 + 1
    }

    /// Always `false`: construction guarantees `min <= max`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the port after `port`, wrapping from `max` back to `min`.
    ///
    /// # Examples
    ///
    /// ```
    /// use portlane::PortRange;
    ///
    /// let range = PortRange::from_bounds(5000, 5002).unwrap();
    /// let max = range.max();
    ///
    /// assert_eq!(range.wrapping_next(range.min()).value(), 5001);
    /// assert_eq!(range.wrapping_next(max), range.min());
    /// ```
    #[must_use]
    pub fn wrapping_next(&self, port: Port) -> Port {
        if port >= self.max {
            self.min
        } else {
            Port(port.value() + 1)
        }
    }

    /// Returns an iterator over all ports in this range, in ascending order.
    #[must_use]
    pub fn iter(self) -> PortRangeIter {
        PortRangeIter {
            next: u32::from(self.min.value()),
            end: u32::from(self.max.value()),
        }
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl IntoIterator for PortRange {
    type Item = Port;
    type IntoIter = PortRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over ports in a `PortRange`.
///
/// Counts in `u32` so a range ending at 65535 terminates cleanly.
#[derive(Debug)]
pub struct PortRangeIter {
    next: u32,
    end: u32,
}

impl Iterator for PortRangeIter {
    type Item = Port;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let value = u16::try_from(self.next).ok()?;
        self.next += 1;
        Some(Port(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PortRangeIter {}

/// Error type for invalid port ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPortRangeError {
    /// The requested lower bound.
    pub min: Port,
    /// The requested upper bound.
    pub max: Port,
    /// Why the range was rejected.
    pub reason: String,
}

impl fmt::Display for InvalidPortRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid port range {}-{}: {}",
            self.min, self.max, self.reason
        )
    }
}

impl std::error::Error for InvalidPortRangeError {}

#[cfg(test)]
mod proptests;
