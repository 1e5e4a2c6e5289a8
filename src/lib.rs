//! # Verso
//!
//! A versioned repository for immutable snapshots, shared across threads
//! with optimistic concurrency control.
//!
//! The repository holds exactly one snapshot. Writers submit a pure update
//! function; the result is installed only if it carries exactly the next
//! version and was computed from the snapshot that is still current.
//! Otherwise the update is rebased onto the newer snapshot and retried, up
//! to a configurable bound.
//!
//! ## Quick Start
//!
//! ```
//! use verso::prelude::*;
//!
//! let repo = Repository::sequential(Snapshot::new(String::from("draft"), 1u64));
//!
//! // Lock-free read
//! assert_eq!(repo.get().value(), "draft");
//!
//! // Update: the closure may run more than once, so keep it pure
//! repo.set(|current| current.advance(format!("{} v2", current.value())))?;
//! assert_eq!(*repo.get().version(), 2);
//! # Ok::<(), verso::RepositoryError<u64>>(())
//! ```
//!
//! ## Failures
//!
//! - [`RepositoryError::InvalidVersion`] - update skipped past the next version
//! - [`RepositoryError::RetryExhausted`] - contention outlasted the retry budget
//! - [`RepositoryError::VersionExhausted`] - latest version has no greater successor
//! - [`RepositoryError::InvalidArgument`] - bad retry bound

#![warn(missing_docs)]

pub mod prelude;

pub use verso_concurrency::{ConfigError, Repository, RepositoryConfig, DEFAULT_MAX_TRY};
pub use verso_core::{RepositoryError, RepositoryResult, Snapshot, Successor, Versioned};
