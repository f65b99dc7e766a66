//! Pools of fixed-length arrays, cached per length

use std::collections::HashMap;

#[cfg(feature = "logging")]
use tracing::debug;

use crate::error::{PoolError, PoolResult};
use crate::registry::PoolStat;
use crate::static_pool::StaticMemoryPool;

/// Pool of boxed slices that all have the same length
///
/// Returned arrays have every element reset to `T::default()` so the next
/// borrower never sees previous contents.
///
/// # Example
/// ```
/// use nebula_pool::array::ArrayPool;
///
/// let mut pool = ArrayPool::<Option<&str>>::new(2);
/// let mut arr = pool.spawn();
/// arr[0] = Some("asdf");
/// pool.despawn(arr);
///
/// let arr = pool.spawn();
/// assert_eq!(&*arr, &[None, None]);
/// ```
#[derive(Debug)]
pub struct ArrayPool<T> {
    len: usize,
    inner: StaticMemoryPool<Box<[T]>>,
}

impl<T: Default + Send + 'static> ArrayPool<T> {
    /// Create a pool of arrays with `len` elements
    pub fn new(len: usize) -> Self {
        let mut inner = StaticMemoryPool::with_allocator(move || {
            (0..len).map(|_| T::default()).collect::<Box<[T]>>()
        });
        inner.set_on_despawn(|arr: &mut Box<[T]>| arr.fill_with(T::default));

        Self { len, inner }
    }
}

impl<T> ArrayPool<T> {
    /// Length of every array in this pool
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the pool hands out empty arrays
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get an array
    pub fn spawn(&mut self) -> Box<[T]> {
        self.inner.spawn_internal()
    }

    /// Return an array, clearing its elements
    ///
    /// The array must have come from this pool.
    pub fn despawn(&mut self, arr: Box<[T]>) {
        debug_assert_eq!(arr.len(), self.len, "array returned to a pool of a different length");
        self.inner.despawn(arr);
    }

    /// Return an array after checking its length
    pub fn try_despawn(&mut self, arr: Box<[T]>) -> PoolResult<()> {
        if arr.len() != self.len {
            return Err(PoolError::invalid_operation(&format!(
                "array of length {} returned to pool of length {}",
                arr.len(),
                self.len
            )));
        }
        self.inner.despawn(arr);
        Ok(())
    }

    /// Resize the inactive stack to exactly `target` arrays
    pub fn resize(&mut self, target: usize) -> PoolResult<()> {
        self.inner.resize(target)
    }

    /// Add `count` inactive arrays
    pub fn expand_by(&mut self, count: usize) -> PoolResult<()> {
        self.inner.expand_by(count)
    }

    /// Drop `count` inactive arrays
    pub fn shrink_by(&mut self, count: usize) -> PoolResult<()> {
        self.inner.shrink_by(count)
    }

    /// Drop every inactive array
    pub fn clear(&mut self) -> PoolResult<()> {
        self.inner.clear()
    }

    /// Force the active count to zero without touching the stack
    pub fn clear_active_count(&mut self) {
        self.inner.clear_active_count();
    }

    /// Arrays owned by the pool or its callers
    pub fn num_total(&self) -> usize {
        self.inner.num_total()
    }

    /// Arrays currently handed out
    pub fn num_active(&self) -> usize {
        self.inner.num_active()
    }

    /// Arrays waiting on the stack
    pub fn num_inactive(&self) -> usize {
        self.inner.num_inactive()
    }
}

impl<T> PoolStat for ArrayPool<T> {
    fn label(&self) -> String {
        format!("{}[{}]", core::any::type_name::<T>(), self.len)
    }

    fn status(&self) -> String {
        self.inner.status()
    }
}

/// Per-length cache of [`ArrayPool`]s
///
/// Repeated requests for the same length share one pool. Pools are never
/// evicted; the cache grows with the number of distinct lengths requested.
#[derive(Debug)]
pub struct ArrayPools<T> {
    pools: HashMap<usize, ArrayPool<T>>,
}

impl<T> Default for ArrayPools<T> {
    fn default() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }
}

impl<T: Default + Send + 'static> ArrayPools<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the pool for arrays of `len` elements, creating it on first use
    pub fn pool(&mut self, len: usize) -> &mut ArrayPool<T> {
        self.pools.entry(len).or_insert_with(|| {
            #[cfg(feature = "logging")]
            debug!(len, "Creating array pool");

            ArrayPool::new(len)
        })
    }
}

impl<T> ArrayPools<T> {
    /// Number of cached pools
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Check if no pool has been created yet
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Lengths with a cached pool, in ascending order
    pub fn lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<_> = self.pools.keys().copied().collect();
        lengths.sort_unstable();
        lengths
    }
}
