//! Versioned repository with optimistic concurrency control
//!
//! A [`Repository`] holds exactly one immutable snapshot. Updates are pure
//! functions from the current snapshot to its successor; the repository
//! installs the result only if it carries exactly the next version AND the
//! snapshot it was computed from is still the latest one.
//!
//! ## Update Sequence
//!
//! ```text
//! 1. capture max_try (budget for this call, never re-read)
//! 2. load latest snapshot L (lock-free)
//! 3. expected = next_version(L.version)
//!      expected not after L.version -> VersionExhausted, no retry
//! 4. updated = update(L)                      (no lock held)
//! 5. compare(expected, updated.version)
//!      Equal   -> lock; install iff latest is still L; unlock
//!      Greater -> stale proposal, rebase (back to 2)
//!      Less    -> InvalidVersion, no retry
//! 6. lost race at 5 -> rebase (back to 2)
//! 7. budget spent -> RetryExhausted
//! ```
//!
//! ## Purity Requirement
//!
//! The update closure may be called up to `max_try + 1` times per `set`.
//! It must be a pure function of the snapshot it receives: no side effects
//! on the repository and the same output for the same input.

use crate::config::RepositoryConfig;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::sync::Arc;
use verso_core::{RepositoryError, RepositoryResult, Successor, Versioned};

type NextVersionFn<V> = Box<dyn Fn(&V) -> V + Send + Sync>;
type CompareFn<V> = Box<dyn Fn(&V, &V) -> Ordering + Send + Sync>;

/// Single-slot store of an immutable, versioned snapshot
///
/// # Thread Safety
///
/// Reads never block: [`get`](Repository::get) is an atomic load of the
/// latest `Arc<T>`. Writers evaluate their update closures concurrently and
/// only serialize on the final "baseline unchanged? then install" step,
/// guarded by an internal lock. Holding the baseline `Arc` for the whole
/// attempt means its address cannot be reused, so the identity check at
/// install time is exact.
///
/// # Example
///
/// ```
/// use verso_concurrency::Repository;
/// use verso_core::{Snapshot, Versioned};
///
/// let repo = Repository::sequential(Snapshot::new(0i64, 1u64));
/// repo.set(|current| current.advance(current.value() + 1)).unwrap();
///
/// let latest = repo.get();
/// assert_eq!(*latest.version(), 2);
/// assert_eq!(*latest.value(), 1);
/// ```
pub struct Repository<T: Versioned> {
    /// Latest committed snapshot
    latest: ArcSwap<T>,

    /// Successor function over versions
    next_version: NextVersionFn<T::Version>,

    /// Three-way comparison over versions
    compare: CompareFn<T::Version>,

    /// Retry bound; read once at the start of every `set`
    max_try: AtomicU32,

    /// Install serialization lock
    ///
    /// Makes "latest is still the baseline" and "store the update" one step.
    /// Never held while an update closure runs.
    install_lock: Mutex<()>,
}

impl<T: Versioned> Repository<T> {
    /// Create a repository from an initial snapshot and version strategies
    ///
    /// # Arguments
    /// * `next_version` - Produces the only version an update may carry
    /// * `compare` - Total order over versions
    /// * `initial` - First snapshot; returned by `get` until an update lands
    pub fn new<N, C>(next_version: N, compare: C, initial: T) -> Self
    where
        N: Fn(&T::Version) -> T::Version + Send + Sync + 'static,
        C: Fn(&T::Version, &T::Version) -> Ordering + Send + Sync + 'static,
    {
        Repository {
            latest: ArcSwap::from_pointee(initial),
            next_version: Box::new(next_version),
            compare: Box::new(compare),
            max_try: AtomicU32::new(RepositoryConfig::default().max_try),
            install_lock: Mutex::new(()),
        }
    }

    /// Create a repository whose versions follow [`Successor`] and [`Ord`]
    pub fn sequential(initial: T) -> Self
    where
        T::Version: Successor + Ord + 'static,
    {
        Self::new(
            |version: &T::Version| version.successor(),
            |a: &T::Version, b: &T::Version| a.cmp(b),
            initial,
        )
    }

    /// Apply configuration (builder style)
    pub fn with_config(mut self, config: RepositoryConfig) -> Self {
        *self.max_try.get_mut() = config.max_try;
        self
    }

    /// Get the latest snapshot
    ///
    /// Lock-free; never observes a partially installed snapshot.
    pub fn get(&self) -> Arc<T> {
        self.latest.load_full()
    }

    /// Current retry bound
    pub fn max_try(&self) -> u32 {
        self.max_try.load(AtomicOrdering::Acquire)
    }

    /// Set the retry bound used by subsequent `set` calls
    ///
    /// Calls already in progress keep the bound they started with.
    ///
    /// # Errors
    /// `InvalidArgument` if `max_try` is negative or does not fit in a `u32`.
    /// The existing bound is left unchanged.
    pub fn set_max_try(&self, max_try: i64) -> RepositoryResult<(), T::Version>
    where
        T::Version: fmt::Debug,
    {
        let bound = u32::try_from(max_try).map_err(|_| RepositoryError::InvalidArgument {
            reason: if max_try < 0 {
                "max_try must be non-negative".to_string()
            } else {
                format!("max_try must not exceed {}", u32::MAX)
            },
        })?;

        self.max_try.store(bound, AtomicOrdering::Release);
        tracing::debug!(max_try = bound, "Retry bound updated");
        Ok(())
    }

    /// Replace the latest snapshot with `update(latest)`
    ///
    /// `update` is re-invoked against the newest snapshot whenever its
    /// proposal is stale or another writer installed first (a rebase).
    ///
    /// # Returns
    /// - Ok(snapshot) - the snapshot this call installed
    /// - Err(InvalidVersion) - proposal skipped past the next version
    /// - Err(VersionExhausted) - the latest version has no greater successor
    /// - Err(RetryExhausted) - `max_try + 1` attempts without an install
    pub fn set<F>(&self, update: F) -> RepositoryResult<Arc<T>, T::Version>
    where
        F: Fn(&T) -> T,
        T::Version: fmt::Debug,
    {
        let max_try = self.max_try.load(AtomicOrdering::Acquire);

        for attempt in 0..=max_try {
            let attempt = u64::from(attempt) + 1;
            let baseline = self.latest.load_full();
            let expected = (self.next_version)(baseline.version());

            // A successor that does not sort after the baseline (e.g. a
            // saturated integer) would install a repeated version
            if (self.compare)(&expected, baseline.version()) != Ordering::Greater {
                tracing::warn!(
                    baseline = ?baseline.version(),
                    successor = ?expected,
                    "Version space exhausted"
                );
                return Err(RepositoryError::VersionExhausted { successor: expected });
            }

            let updated = update(&baseline);

            match (self.compare)(&expected, updated.version()) {
                Ordering::Equal => match self.install(&baseline, updated) {
                    Some(installed) => {
                        tracing::trace!(
                            from = ?baseline.version(),
                            to = ?installed.version(),
                            attempt,
                            "Snapshot installed"
                        );
                        return Ok(installed);
                    }
                    None => {
                        tracing::debug!(
                            baseline = ?baseline.version(),
                            attempt,
                            max_try,
                            "Lost install race, rebasing"
                        );
                    }
                },
                Ordering::Greater => {
                    tracing::debug!(
                        expected = ?expected,
                        proposed = ?updated.version(),
                        attempt,
                        max_try,
                        "Stale proposal, rebasing"
                    );
                }
                Ordering::Less => {
                    tracing::warn!(
                        expected = ?expected,
                        proposed = ?updated.version(),
                        "Update skipped past the next version"
                    );
                    return Err(RepositoryError::InvalidVersion { expected });
                }
            }
        }

        tracing::warn!(max_try, "Retry budget exhausted without installing an update");
        Err(RepositoryError::RetryExhausted { max_try })
    }

    /// Install `updated` iff `baseline` is still the latest snapshot
    fn install(&self, baseline: &Arc<T>, updated: T) -> Option<Arc<T>> {
        let _install_guard = self.install_lock.lock();

        let current = self.latest.load();
        if !Arc::ptr_eq(&*current, baseline) {
            return None;
        }

        let installed = Arc::new(updated);
        self.latest.store(Arc::clone(&installed));
        Some(installed)
    }
}

impl<T> fmt::Debug for Repository<T>
where
    T: Versioned + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("latest", &*self.get())
            .field("max_try", &self.max_try())
            .finish_non_exhaustive()
    }
}
