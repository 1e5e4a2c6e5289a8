//! Core types for Verso
//!
//! This crate defines the contract between a versioned repository and the
//! values it stores:
//! - Versioned: immutable snapshots exposing a version
//! - Successor: next-version production for integer ticks
//! - Snapshot: a ready-made value/version pair
//! - RepositoryError: typed failures of repository operations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod error;

pub use contract::{Snapshot, Successor, Versioned};
pub use error::{RepositoryError, RepositoryResult};
