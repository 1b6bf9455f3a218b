//! Sequential, wrap-around port allocation within one worker's range.
//!
//! The allocator walks its range circularly from the last port it handed
//! out, probing each candidate with a real bind, and returns the first one
//! that binds. It keeps no record of earlier allocations beyond that cursor:
//! a port handed out earlier is skipped on the next lap only if its owner
//! still holds it bound.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Error;
use crate::{Port, PortRange, Result};

use super::probe::{BindProbe, TcpBindProbe};

/// Thread-safe sequential port allocator.
///
/// The cursor starts at the range minimum, so the first allocation tries
/// `min + 1`. The scan gives up when it comes back around to the cursor,
/// which means `min` is only reachable once the cursor has moved off it.
///
/// # Type Parameters
///
/// * `P` - The bind probe used to test candidates (defaults to [`TcpBindProbe`])
///
/// # Examples
///
/// ```
/// use portlane::port::allocator::SequentialPortAllocator;
/// use portlane::port::probe::MockBindProbe;
/// use portlane::PortRange;
///
/// let range = PortRange::from_bounds(20000, 20002).unwrap();
/// let allocator = SequentialPortAllocator::with_probe(range, MockBindProbe::empty());
///
/// assert_eq!(allocator.allocate().unwrap().value(), 20001);
/// assert_eq!(allocator.allocate().unwrap().value(), 20002);
/// assert_eq!(allocator.allocate().unwrap().value(), 20000);
/// ```
#[derive(Debug)]
pub struct SequentialPortAllocator<P: BindProbe = TcpBindProbe> {
    range: PortRange,
    probe: P,
    cursor: Mutex<Port>,
}

impl SequentialPortAllocator<TcpBindProbe> {
    /// Creates an allocator that probes with a wildcard TCP bind.
    #[must_use]
    pub fn new(range: PortRange) -> Self {
        Self::with_probe(range, TcpBindProbe::default())
    }
}

impl<P: BindProbe> SequentialPortAllocator<P> {
    /// Creates an allocator with a custom bind probe.
    #[must_use]
    pub fn with_probe(range: PortRange, probe: P) -> Self {
        Self {
            range,
            probe,
            cursor: Mutex::new(range.min()),
        }
    }

    /// The range this allocator draws from.
    #[must_use]
    pub const fn range(&self) -> PortRange {
        self.range
    }

    /// The bind probe used for candidates.
    #[must_use]
    pub const fn probe(&self) -> &P {
        &self.probe
    }

    /// The most recently allocated port, or the range minimum before the
    /// first allocation.
    #[must_use]
    pub fn cursor(&self) -> Port {
        *self.lock_cursor()
    }

    /// Allocates the next bindable port after the cursor.
    ///
    /// The whole scan runs under the allocator's lock, so two threads can
    /// never both pick the same candidate. A call makes fewer than
    /// `range.len()` probes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeExhausted`] if the scan returns to the cursor
    /// without finding a bindable port.
    pub fn allocate(&self) -> Result<Port> {
        let mut cursor = self.lock_cursor();
        let start = *cursor;
        let mut candidate = start;

        loop {
            candidate = self.range.wrapping_next(candidate);
            if candidate == start {
                log::error!("port range {} exhausted", self.range);
                return Err(Error::RangeExhausted { range: self.range });
            }

            if self.probe.is_bindable(candidate) {
                *cursor = candidate;
                log::info!("assigning port {candidate}");
                return Ok(candidate);
            }
        }
    }

    /// Allocates `count` ports in sequence.
    ///
    /// Each port is probed independently and released before the next one is
    /// chosen, so the result is only collision-free if the caller binds the
    /// ports before another worker could. Stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeExhausted`] if the range runs dry part way.
    pub fn allocate_many(&self, count: usize) -> Result<Vec<Port>> {
        (0..count).map(|_| self.allocate()).collect()
    }

    // The cursor is always a valid port in range, so a panic in another
    // caller cannot leave it inconsistent.
    fn lock_cursor(&self) -> MutexGuard<'_, Port> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
