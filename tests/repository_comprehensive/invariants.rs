//! Repository Invariant Tests
//!
//! Property-based checks:
//! - Only the exact next version is ever installed
//! - Rejected updates leave the stored snapshot untouched
//! - Attempts per call never exceed max_try + 1

use crate::*;
use proptest::prelude::*;
use std::cell::Cell;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_only_exact_successor_installs(
        start in 2u64..1_000,
        max_try in 0i64..5,
        offsets in prop::collection::vec(-2i64..=3, 1..40),
    ) {
        let repo = Repository::sequential(Snapshot::new(String::new(), start));
        repo.set_max_try(max_try).unwrap();

        for offset in offsets {
            let before = repo.get();
            let calls = Cell::new(0i64);

            let result = repo.set(|s| {
                calls.set(calls.get() + 1);
                let proposed = (*s.version() as i64 + offset) as u64;
                Snapshot::new(format!("offset {}", offset), proposed)
            });

            let after = repo.get();
            let expected = *before.version() + 1;

            if offset == 1 {
                let installed = result.unwrap();
                prop_assert_eq!(*installed.version(), expected);
                prop_assert!(Arc::ptr_eq(&installed, &after));
                prop_assert_eq!(calls.get(), 1);
            } else if offset > 1 {
                prop_assert_eq!(
                    result.unwrap_err(),
                    RepositoryError::InvalidVersion { expected }
                );
                prop_assert!(Arc::ptr_eq(&before, &after));
                prop_assert_eq!(calls.get(), 1);
            } else {
                prop_assert_eq!(
                    result.unwrap_err(),
                    RepositoryError::RetryExhausted { max_try: max_try as u32 }
                );
                prop_assert!(Arc::ptr_eq(&before, &after));
                prop_assert_eq!(calls.get(), max_try + 1);
            }

            prop_assert!(*after.version() >= *before.version());
        }
    }

    #[test]
    fn prop_advancing_updates_always_land(
        start in 0u64..1_000_000,
        max_try in 0i64..5,
        count in 1usize..100,
    ) {
        let repo = Repository::sequential(Snapshot::new(0usize, start));
        repo.set_max_try(max_try).unwrap();

        for _ in 0..count {
            repo.set(|s| s.advance(s.value() + 1)).unwrap();
        }

        prop_assert_eq!(*repo.get().value(), count);
        prop_assert_eq!(*repo.get().version(), start + count as u64);
    }
}
