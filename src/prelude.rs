//! Convenient imports for Verso.
//!
//! ```
//! use verso::prelude::*;
//!
//! let repo = Repository::sequential(Snapshot::new(0u32, 0u64));
//! repo.set(|s| s.advance(s.value() + 1)).unwrap();
//! ```

// Main entry point
pub use crate::{Repository, RepositoryConfig};

// Error handling
pub use crate::{RepositoryError, RepositoryResult};

// Versioning contract
pub use crate::{Snapshot, Successor, Versioned};
