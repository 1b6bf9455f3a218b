//! Property-based tests for `Port`, `PortRange` and the sequential allocator.

use std::collections::HashSet;

use super::allocator::SequentialPortAllocator;
use super::probe::MockBindProbe;
use super::{Port, PortRange};
use proptest::prelude::*;

fn arb_range() -> impl Strategy<Value = PortRange> {
    (Port::MIN..=Port::MAX, 0u16..=64).prop_map(|(start, len)| {
        let end = start.saturating_add(len);
        PortRange::from_bounds(start, end).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // contains() matches the numeric bounds
    #[test]
    fn port_range_contains_accuracy(range in arb_range(), probe in Port::MIN..=Port::MAX) {
        let port = Port::try_from(probe).unwrap();
        let expected = probe >= range.min().value() && probe <= range.max().value();
        prop_assert_eq!(range.contains(port), expected);
    }

    // The iterator yields exactly len() ascending ports, including at 65535
    #[test]
    fn port_range_iterator_matches_len(range in arb_range()) {
        let ports: Vec<Port> = range.iter().collect();
        prop_assert_eq!(ports.len() as u32, range.len());
        prop_assert_eq!(ports.first().copied(), Some(range.min()));
        prop_assert_eq!(ports.last().copied(), Some(range.max()));
        for window in ports.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
    }

    // len() successive wrapping steps visit every port once and return home
    #[test]
    fn wrapping_next_is_a_full_cycle(range in arb_range()) {
        let mut seen = HashSet::new();
        let mut current = range.min();
        for _ in 0..range.len() {
            prop_assert!(range.contains(current));
            prop_assert!(seen.insert(current));
            current = range.wrapping_next(current);
        }
        prop_assert_eq!(current, range.min());
    }

    // With nothing occupied, allocations are the cursor's successors in order
    #[test]
    fn free_range_allocates_successors(range in arb_range(), count in 1usize..=64) {
        let allocator = SequentialPortAllocator::with_probe(range, MockBindProbe::empty());
        if range.len() == 1 {
            prop_assert!(allocator.allocate().unwrap_err().is_exhausted());
            return Ok(());
        }

        let mut expected = range.min();
        for _ in 0..count {
            expected = range.wrapping_next(expected);
            prop_assert_eq!(allocator.allocate().unwrap(), expected);
        }
    }

    // Held ports are never handed out twice, and exhaustion always terminates
    #[test]
    fn held_ports_are_unique_until_exhaustion(range in arb_range()) {
        let allocator = SequentialPortAllocator::with_probe(range, MockBindProbe::empty());
        let mut held = HashSet::new();

        loop {
            match allocator.allocate() {
                Ok(port) => {
                    prop_assert!(range.contains(port));
                    prop_assert!(held.insert(port));
                    allocator.probe().mark_occupied(port);
                }
                Err(err) => {
                    prop_assert!(err.is_exhausted());
                    break;
                }
            }
            prop_assert!(held.len() as u32 <= range.len());
        }

        // a single-port range never moves its cursor, anything larger fills up
        let expected = if range.len() == 1 { 0 } else { range.len() };
        prop_assert_eq!(held.len() as u32, expected);
    }
}
