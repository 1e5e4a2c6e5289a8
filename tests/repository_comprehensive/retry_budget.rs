//! Retry Budget Tests
//!
//! Tests for the bounded retry loop:
//! - Exhaustion after max_try + 1 attempts
//! - Argument validation on set_max_try
//! - Budget captured once per call

use crate::*;
use std::cell::Cell;

#[test]
fn test_give_up_after_max_try_reached() {
    let repo = create_repo();
    repo.set_max_try(3).unwrap();
    let calls = Cell::new(0i64);

    let err = repo
        .set(|_| {
            calls.set(calls.get() + 1);
            // 7, 8, 9, 10: always behind the required 11
            VersionedString::new(6 + calls.get(), "stale")
        })
        .unwrap_err();

    assert_eq!(err, RepositoryError::RetryExhausted { max_try: 3 });
    assert!(err.to_string().contains("max retry 3"));
    assert!(err.is_retryable());
    assert_eq!(calls.get(), 4);
    assert_eq!(*repo.get(), VersionedString::new(10, "initial"));
}

#[test]
fn test_default_budget_allows_four_attempts() {
    let repo = create_repo();
    let calls = Cell::new(0);

    let installed = repo
        .set(|current| {
            calls.set(calls.get() + 1);
            if calls.get() < 4 {
                VersionedString::new(current.version, "stale")
            } else {
                VersionedString::new(current.version + 1, "fresh")
            }
        })
        .unwrap();

    assert_eq!(calls.get(), 4);
    assert_eq!(installed.value, "fresh");
}

#[test]
fn test_negative_max_try_rejected() {
    let repo = create_repo();
    repo.set_max_try(5).unwrap();

    let err = repo.set_max_try(-1).unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("non-negative"));
    assert_eq!(repo.max_try(), 5);
}

#[test]
fn test_zero_max_try_means_single_attempt() {
    let repo = create_doc_repo(4);
    repo.set_max_try(0).unwrap();

    // A correct update still succeeds on its only attempt
    repo.set(|s| s.advance(String::from("once"))).unwrap();

    let calls = Cell::new(0);
    let err = repo
        .set(|s| {
            calls.set(calls.get() + 1);
            Snapshot::new(String::from("stale"), *s.version())
        })
        .unwrap_err();

    assert_eq!(err, RepositoryError::RetryExhausted { max_try: 0 });
    assert_eq!(calls.get(), 1);
    assert_eq!(*repo.get().version(), 5);
}

#[test]
fn test_bound_change_mid_call_does_not_extend_budget() {
    let repo = create_doc_repo(0);
    repo.set_max_try(2).unwrap();
    let calls = Cell::new(0);

    let err = repo
        .set(|s| {
            calls.set(calls.get() + 1);
            repo.set_max_try(1_000).unwrap();
            Snapshot::new(String::from("stale"), *s.version())
        })
        .unwrap_err();

    assert_eq!(err, RepositoryError::RetryExhausted { max_try: 2 });
    assert_eq!(calls.get(), 3);

    // The new bound applies to the next call
    assert_eq!(repo.max_try(), 1_000);
}

#[test]
fn test_config_from_toml() {
    let config = RepositoryConfig::from_toml_str("max_try = 1").unwrap();
    let repo = create_doc_repo(0).with_config(config);
    let calls = Cell::new(0);

    let err = repo
        .set(|s| {
            calls.set(calls.get() + 1);
            Snapshot::new(String::from("stale"), *s.version())
        })
        .unwrap_err();

    assert!(err.is_retry_exhausted());
    assert_eq!(calls.get(), 2);
}
