//! Error types for repository operations
//!
//! Each failure the repository can report has its own variant so callers can
//! tell a bad argument, a buggy update function and sustained contention
//! apart without string matching.
//!
//! | Variant | Raised by | Retried internally |
//! |---------|-----------|--------------------|
//! | InvalidArgument | `set_max_try` | no |
//! | InvalidVersion | `set` | no |
//! | RetryExhausted | `set` | budget already spent |
//! | VersionExhausted | `set` | no |

use std::fmt;
use thiserror::Error;

/// Errors reported by a versioned repository
///
/// Generic over the version type so that [`RepositoryError::InvalidVersion`]
/// can carry the exact version the update was required to have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError<V: fmt::Debug> {
    /// Caller passed an unacceptable argument (e.g. a negative retry bound)
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: String,
    },

    /// Update function produced a version beyond the immediate successor
    ///
    /// This is a bug in the update function's version assignment, not a race.
    #[error("invalid version: an update requires the next version of exactly {expected:?}")]
    InvalidVersion {
        /// The only version the update was allowed to carry
        expected: V,
    },

    /// The retry budget ran out before an update could be installed
    #[error("reached max retry {max_try} and still unable to install the exact next version")]
    RetryExhausted {
        /// The bound captured when the update started
        max_try: u32,
    },

    /// The latest version has no successor that sorts after it
    ///
    /// Raised instead of installing a snapshot whose version would repeat the
    /// latest one, e.g. once an integer version reaches its type's maximum.
    #[error("version exhausted: successor {successor:?} does not advance past the latest version")]
    VersionExhausted {
        /// What the next-version producer returned for the latest version
        successor: V,
    },
}

/// Result type for repository operations
pub type RepositoryResult<T, V> = std::result::Result<T, RepositoryError<V>>;

impl<V: fmt::Debug> RepositoryError<V> {
    /// Check if this error is retryable.
    ///
    /// Only exhaustion qualifies: resubmitting later (e.g. after a backoff) may
    /// succeed once contention drops. The other variants are caller bugs.
    pub fn is_retryable(&self) -> bool {
        self.is_retry_exhausted()
    }

    /// Check if this is an invalid-version error.
    pub fn is_invalid_version(&self) -> bool {
        matches!(self, RepositoryError::InvalidVersion { .. })
    }

    /// Check if this is a retry-exhausted error.
    pub fn is_retry_exhausted(&self) -> bool {
        matches!(self, RepositoryError::RetryExhausted { .. })
    }

    /// Check if this is a version-exhausted error.
    pub fn is_version_exhausted(&self) -> bool {
        matches!(self, RepositoryError::VersionExhausted { .. })
    }

    /// Check if this is an invalid-argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RepositoryError::InvalidArgument { .. })
    }
}
