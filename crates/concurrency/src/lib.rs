//! Concurrency layer for Verso
//!
//! This crate implements the versioned repository, an optimistic concurrency
//! control (OCC) primitive with:
//! - Lock-free reads of the latest immutable snapshot
//! - Exact-successor version checks at commit time
//! - Rebase-and-retry of pure update functions under a bounded budget
//! - A narrow install lock that never covers update evaluation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod repository;

pub use config::{ConfigError, RepositoryConfig, DEFAULT_MAX_TRY};
pub use repository::Repository;
