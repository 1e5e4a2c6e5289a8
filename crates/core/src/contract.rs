//! Versioning contract shared by every repository value
//!
//! A repository stores exactly one immutable snapshot at a time. Anything
//! that can be stored implements [`Versioned`], exposing the version that
//! positions it in the update sequence.
//!
//! ## Version Successors
//!
//! The repository only accepts an update whose version is exactly the
//! successor of the current one. [`Successor`] provides that successor for
//! the integer types commonly used as version ticks, so that callers do not
//! have to hand-write a next-version function for the usual case.

/// An immutable value that carries a version
///
/// Implementors must not change their version (or anything else observable)
/// after construction. The repository hands snapshots to concurrent readers
/// by shared reference.
pub trait Versioned {
    /// Version type, totally ordered by the repository's comparator
    type Version;

    /// The version of this snapshot
    fn version(&self) -> &Self::Version;
}

/// Deterministic "next version" for a version type
///
/// Integer implementations return the type's maximum unchanged once it is
/// reached. A repository treats a successor that does not sort after the
/// latest version as exhaustion and rejects the update, so the maximum is the
/// last version it will ever hold.
pub trait Successor {
    /// The version immediately after `self`
    fn successor(&self) -> Self;
}

macro_rules! impl_successor {
    ($($t:ty),* $(,)?) => {
        $(
            impl Successor for $t {
                #[inline]
                fn successor(&self) -> Self {
                    self.saturating_add(1)
                }
            }
        )*
    };
}

impl_successor!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Ready-made immutable snapshot: a value paired with its version
///
/// # Example
///
/// ```
/// use verso_core::{Snapshot, Versioned};
///
/// let first = Snapshot::new("draft", 1u64);
/// let second = first.advance("final");
/// assert_eq!(*second.version(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot<D, V = u64> {
    value: D,
    version: V,
}

impl<D, V> Snapshot<D, V> {
    /// Create a snapshot with an explicit version
    pub fn new(value: D, version: V) -> Self {
        Self { value, version }
    }

    /// The stored value
    pub fn value(&self) -> &D {
        &self.value
    }

    /// Consume the snapshot, returning the stored value
    pub fn into_value(self) -> D {
        self.value
    }

    /// Build the snapshot that follows this one, carrying `value`
    ///
    /// This is the usual body of an update function: the result's version is
    /// exactly the successor of the input's version.
    pub fn advance(&self, value: D) -> Self
    where
        V: Successor,
    {
        Self {
            value,
            version: self.version.successor(),
        }
    }
}

impl<D, V> Versioned for Snapshot<D, V> {
    type Version = V;

    fn version(&self) -> &V {
        &self.version
    }
}
