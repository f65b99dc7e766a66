//! Trait for objects that can be cleared and reused

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Trait for objects that can be pooled
///
/// # Example
/// ```
/// use nebula_pool::poolable::Poolable;
///
/// struct Frame {
///     id: u64,
///     buffer: Vec<u8>,
/// }
///
/// impl Poolable for Frame {
///     fn reset(&mut self) {
///         self.buffer.clear();
///     }
///
///     fn is_reset(&self) -> bool {
///         self.buffer.is_empty()
///     }
///
///     fn with_capacity_hint(capacity: usize) -> Self {
///         Frame { id: 0, buffer: Vec::with_capacity(capacity) }
///     }
/// }
/// ```
pub trait Poolable {
    /// Reset object to its freshly-allocated state
    ///
    /// Called when an object is returned to the pool. Implementations
    /// should clear contents but keep allocated capacity.
    fn reset(&mut self);

    /// Check whether the object holds no state from a previous borrower
    fn is_reset(&self) -> bool {
        true
    }

    /// Number of elements currently held
    ///
    /// Used for peak-occupancy diagnostics.
    fn occupancy(&self) -> usize {
        0
    }

    /// Create an empty instance with room for `capacity` elements
    fn with_capacity_hint(capacity: usize) -> Self
    where
        Self: Sized;
}

// Standard library implementations

impl Poolable for String {
    fn reset(&mut self) {
        self.clear();
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }

    fn occupancy(&self) -> usize {
        self.len()
    }

    fn with_capacity_hint(capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }
}

impl<T> Poolable for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }

    fn occupancy(&self) -> usize {
        self.len()
    }

    fn with_capacity_hint(capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }
}

impl<T> Poolable for VecDeque<T> {
    fn reset(&mut self) {
        self.clear();
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }

    fn occupancy(&self) -> usize {
        self.len()
    }

    fn with_capacity_hint(capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }
}

impl<K, V, S> Poolable for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn reset(&mut self) {
        self.clear();
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }

    fn occupancy(&self) -> usize {
        self.len()
    }

    fn with_capacity_hint(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Poolable for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn reset(&mut self) {
        self.clear();
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }

    fn occupancy(&self) -> usize {
        self.len()
    }

    fn with_capacity_hint(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

// B-trees have no capacity to keep; the hint is ignored.

impl<K: Ord, V> Poolable for BTreeMap<K, V> {
    fn reset(&mut self) {
        self.clear();
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }

    fn occupancy(&self) -> usize {
        self.len()
    }

    fn with_capacity_hint(_capacity: usize) -> Self {
        Self::new()
    }
}

impl<T: Ord> Poolable for BTreeSet<T> {
    fn reset(&mut self) {
        self.clear();
    }

    fn is_reset(&self) -> bool {
        self.is_empty()
    }

    fn occupancy(&self) -> usize {
        self.len()
    }

    fn with_capacity_hint(_capacity: usize) -> Self {
        Self::new()
    }
}

/// Macro to implement Poolable for simple types
///
/// The type must implement `Default`; the capacity hint is ignored.
#[macro_export]
macro_rules! impl_poolable {
    ($type:ty, $reset:expr) => {
        impl $crate::poolable::Poolable for $type {
            fn reset(&mut self) {
                $reset(self);
            }

            fn with_capacity_hint(_capacity: usize) -> Self {
                <$type as ::core::default::Default>::default()
            }
        }
    };

    ($type:ty, $reset:expr, $is_reset:expr) => {
        impl $crate::poolable::Poolable for $type {
            fn reset(&mut self) {
                $reset(self);
            }

            fn is_reset(&self) -> bool {
                $is_reset(self)
            }

            fn with_capacity_hint(_capacity: usize) -> Self {
                <$type as ::core::default::Default>::default()
            }
        }
    };
}
