//! Bind probes for checking whether a port is free right now.
//!
//! The allocator only trusts a port after it has actually bound and released
//! it. The probe is a trait so tests can script which ports look occupied
//! without touching real sockets.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::Port;

/// Checks whether a port can be bound at this moment.
///
/// A `true` answer is only a snapshot: another process may bind the port
/// right after the probe releases it.
///
/// # Examples
///
/// ```
/// use portlane::port::probe::{BindProbe, MockBindProbe};
/// use portlane::Port;
///
/// let probe = MockBindProbe::empty();
/// probe.mark_occupied(Port::try_from(11222).unwrap());
///
/// assert!(!probe.is_bindable(Port::try_from(11222).unwrap()));
/// assert!(probe.is_bindable(Port::try_from(11223).unwrap()));
/// ```
pub trait BindProbe: Send + Sync {
    /// Returns `true` if `port` could be bound and was released again.
    fn is_bindable(&self, port: Port) -> bool;
}

impl<P: BindProbe + ?Sized> BindProbe for Arc<P> {
    fn is_bindable(&self, port: Port) -> bool {
        (**self).is_bindable(port)
    }
}

/// Probes by opening a TCP listener and dropping it immediately.
///
/// Binds the wildcard IPv4 address by default, which also collides with
/// listeners on any specific local interface.
///
/// # Examples
///
/// ```
/// use portlane::port::probe::{BindProbe, TcpBindProbe};
/// use portlane::Port;
/// use std::net::TcpListener;
///
/// let held = TcpListener::bind("0.0.0.0:0").unwrap();
/// let port = Port::try_from(held.local_addr().unwrap().port()).unwrap();
///
/// assert!(!TcpBindProbe::default().is_bindable(port));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpBindProbe {
    address: IpAddr,
}

impl TcpBindProbe {
    /// Creates a probe that binds `address`.
    #[must_use]
    pub const fn new(address: IpAddr) -> Self {
        Self { address }
    }

    /// The address this probe binds.
    #[must_use]
    pub const fn address(&self) -> IpAddr {
        self.address
    }
}

impl Default for TcpBindProbe {
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

impl BindProbe for TcpBindProbe {
    fn is_bindable(&self, port: Port) -> bool {
        match TcpListener::bind(SocketAddr::new(self.address, port.value())) {
            Ok(listener) => {
                drop(listener);
                true
            }
            Err(e) => {
                log::trace!("port {port} failed bind probe on {}: {e}", self.address);
                false
            }
        }
    }
}

/// Scripted probe for tests.
///
/// Ports in the occupied set fail the probe; everything else passes. The set
/// can change while an allocator owns the probe, which is how tests simulate
/// another process grabbing a port. Every call is counted.
#[derive(Debug, Default)]
pub struct MockBindProbe {
    occupied: RwLock<HashSet<Port>>,
    probes: AtomicUsize,
}

impl MockBindProbe {
    /// Creates a probe with the given ports occupied.
    #[must_use]
    pub fn new(occupied: HashSet<Port>) -> Self {
        Self {
            occupied: RwLock::new(occupied),
            probes: AtomicUsize::new(0),
        }
    }

    /// Creates a probe on which every port is free.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Makes `port` fail future probes.
    pub fn mark_occupied(&self, port: Port) {
        self.occupied
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(port);
    }

    /// Makes `port` pass future probes.
    pub fn mark_free(&self, port: Port) {
        self.occupied
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&port);
    }

    /// Number of probes performed so far.
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl BindProbe for MockBindProbe {
    fn is_bindable(&self, port: Port) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        !self
            .occupied
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(value: u16) -> Port {
        Port::try_from(value).unwrap()
    }

    #[test]
    fn test_mock_probe_empty() {
        let probe = MockBindProbe::empty();
        assert!(probe.is_bindable(port(11222)));
        assert_eq!(probe.probe_count(), 1);
    }

    #[test]
    fn test_mock_probe_with_occupied_ports() {
        let probe = MockBindProbe::new([port(8080), port(8081)].into_iter().collect());

        assert!(!probe.is_bindable(port(8080)));
        assert!(!probe.is_bindable(port(8081)));
        assert!(probe.is_bindable(port(8082)));
        assert_eq!(probe.probe_count(), 3);
    }

    #[test]
    fn test_mock_probe_mark_free() {
        let probe = MockBindProbe::empty();
        probe.mark_occupied(port(8080));
        assert!(!probe.is_bindable(port(8080)));

        probe.mark_free(port(8080));
        assert!(probe.is_bindable(port(8080)));
    }

    #[test]
    fn test_arc_probe_shares_state() {
        let shared = Arc::new(MockBindProbe::empty());
        let handle = Arc::clone(&shared);
        shared.mark_occupied(port(9000));

        assert!(!handle.is_bindable(port(9000)));
        assert_eq!(shared.probe_count(), 1);
    }

    #[test]
    fn test_tcp_probe_default_is_wildcard() {
        assert_eq!(
            TcpBindProbe::default().address(),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );
    }

    #[test]
    fn test_tcp_probe_detects_held_port() {
        let held = TcpListener::bind("0.0.0.0:0").unwrap();
        let held_port = port(held.local_addr().unwrap().port());

        assert!(!TcpBindProbe::default().is_bindable(held_port));
    }

    #[test]
    fn test_tcp_probe_releases_port() {
        let free_port = {
            let listener = TcpListener::bind("0.0.0.0:0").unwrap();
            port(listener.local_addr().unwrap().port())
        };

        let probe = TcpBindProbe::default();
        assert!(probe.is_bindable(free_port));
        // the probe must not keep the socket open
        assert!(TcpListener::bind(("0.0.0.0", free_port.value())).is_ok());
    }
}
