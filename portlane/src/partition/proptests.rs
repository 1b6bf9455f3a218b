//! Property-based tests for worker range partitioning.

use super::{compute_range, partition_table, WorkerIdentity, GLOBAL_RANGE};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Sibling workers never share a port and never leave the global range
    #[test]
    fn worker_ranges_are_disjoint_subsets(count in 2u32..=128) {
        let table = partition_table(count);
        prop_assert_eq!(table.len(), count as usize);

        for (i, range) in table.iter().enumerate() {
            prop_assert!(range.is_subset_of(&GLOBAL_RANGE));
            for other in &table[i + 1..] {
                prop_assert!(!range.overlaps(other), "{} overlaps {}", range, other);
            }
        }
    }

    // Consecutive workers are adjacent: no gaps except the trailing remainder
    #[test]
    fn worker_ranges_are_contiguous(count in 2u32..=512) {
        let table = partition_table(count);
        prop_assert_eq!(table[0].min(), GLOBAL_RANGE.min());
        for pair in table.windows(2) {
            prop_assert_eq!(u32::from(pair[0].max().value()) + 1, u32::from(pair[1].min().value()));
        }

        let span = u32::from(GLOBAL_RANGE.max().value() - GLOBAL_RANGE.min().value());
        let unreachable = u32::from(GLOBAL_RANGE.max().value() - table[table.len() - 1].max().value());
        prop_assert_eq!(unreachable, span % count + 1);
    }

    // Every worker of a split gets the same number of ports
    #[test]
    fn worker_ranges_have_equal_size(count in 2u32..=512, pick in 0usize..512) {
        let table = partition_table(count);
        let index = pick % table.len();
        prop_assert_eq!(table[index].len(), table[0].len());
    }

    // The string front end agrees with the typed identity
    #[test]
    fn strings_match_identity(
        (count, index) in (2i64..=64).prop_flat_map(|count| (Just(count), 1..=count))
    ) {
        let count_text = count.to_string();
        let command_line = format!("runner --flag threadid={index} --other");
        let from_strings = compute_range(Some(&count_text), Some(&command_line));
        prop_assert_eq!(from_strings, WorkerIdentity::new(count, index).range());
    }

    // A single worker, or no worker identity at all, owns the whole range
    #[test]
    fn unpartitioned_owns_global_range(index in 0i64..=1000, junk in "[a-z ]{0,20}") {
        prop_assert_eq!(WorkerIdentity::new(1, index).range(), GLOBAL_RANGE);
        prop_assert_eq!(compute_range(Some("1"), Some(&format!("threadid={index}"))), GLOBAL_RANGE);
        prop_assert_eq!(compute_range(None, Some(&junk)), GLOBAL_RANGE);
        prop_assert_eq!(compute_range(Some("4"), Some(&junk)), GLOBAL_RANGE);
    }

    // Whatever the input, the result stays inside the global range
    #[test]
    fn any_identity_stays_in_global_range(count in any::<i64>(), index in any::<i64>()) {
        let range = WorkerIdentity::new(count, index).range();
        prop_assert!(range.is_subset_of(&GLOBAL_RANGE));
    }
}
