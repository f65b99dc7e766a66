//! Scoped release of pooled instances
//!
//! A [`DisposeBlock`] collects everything a scope borrowed from pools and
//! releases it when the scope ends, including when it ends by panicking.

use core::any::Any;
use core::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

#[cfg(feature = "logging")]
use tracing::error;

use crate::error::PoolResult;
use crate::recycle::{Pooled, SharedPool};

/// Something that must be released exactly once
pub trait Disposable {
    /// Release the resource
    fn dispose(self: Box<Self>);

    /// Reach the wrapped value, if it has one
    fn item_mut(&mut self) -> Option<&mut dyn Any> {
        None
    }
}

impl<T: 'static> Disposable for Pooled<'_, T> {
    fn dispose(self: Box<Self>) {
        drop(self);
    }

    fn item_mut(&mut self) -> Option<&mut dyn Any> {
        let item: &mut T = self;
        Some(item)
    }
}

/// Closure run on disposal, see [`DisposeBlock::defer`]
struct Deferred<F>(F);

impl<F: FnOnce()> Disposable for Deferred<F> {
    fn dispose(self: Box<Self>) {
        let Self(f) = *self;
        f();
    }
}

/// Releases every collected item when dropped
///
/// Items are released in insertion order. A release that panics does not
/// stop the remaining ones; the first panic is resumed once all items are
/// released, unless the block is already being dropped during a panic.
///
/// # Example
/// ```
/// use nebula_pool::dispose::DisposeBlock;
/// use nebula_pool::memory_pool::MemoryPool;
/// use nebula_pool::settings::PoolSettings;
///
/// let pool = MemoryPool::<Vec<u8>>::with_default(PoolSettings::default())?;
/// {
///     let mut block = DisposeBlock::new();
///     let buf = block.spawn(&pool)?;
///     block.get_mut::<Vec<u8>>(buf).unwrap().push(1);
///     assert_eq!(pool.num_active(), 1);
/// }
/// assert_eq!(pool.num_active(), 0);
/// # Ok::<(), nebula_pool::PoolError>(())
/// ```
#[derive(Default)]
pub struct DisposeBlock<'a> {
    items: Vec<Box<dyn Disposable + 'a>>,
}

impl<'a> DisposeBlock<'a> {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `item`, returning its index in the block
    pub fn add(&mut self, item: impl Disposable + 'a) -> usize {
        self.items.push(Box::new(item));
        self.items.len() - 1
    }

    /// Spawn from `pool` and keep the instance until the block is dropped
    pub fn spawn<T, P>(&mut self, pool: &'a P) -> PoolResult<usize>
    where
        T: 'static,
        P: SharedPool<T>,
    {
        self.spawn_with(pool, ())
    }

    /// Spawn from `pool` with arguments
    pub fn spawn_with<T, A, P>(&mut self, pool: &'a P, args: A) -> PoolResult<usize>
    where
        T: 'static,
        P: SharedPool<T, A>,
    {
        let guard = pool.spawn_pooled_with(args)?;
        Ok(self.add(guard))
    }

    /// Run `f` when the block is dropped
    pub fn defer(&mut self, f: impl FnOnce() + 'a) -> usize {
        self.add(Deferred(f))
    }

    /// Reach the instance held at `index`
    ///
    /// Returns `None` for an unknown index, a deferred closure, or a type
    /// mismatch.
    pub fn get_mut<T: 'static>(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)?.item_mut()?.downcast_mut::<T>()
    }

    /// Number of items waiting for release
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the block holds nothing
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Drop for DisposeBlock<'_> {
    fn drop(&mut self) {
        let mut first_panic = None;

        for (index, item) in self.items.drain(..).enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(move || item.dispose()));
            if let Err(payload) = result {
                #[cfg(feature = "logging")]
                error!(index, "Disposal panicked; releasing remaining items");
                #[cfg(not(feature = "logging"))]
                let _ = index;

                first_panic.get_or_insert(payload);
            }
        }

        if let Some(payload) = first_panic
            && !thread::panicking()
        {
            panic::resume_unwind(payload);
        }
    }
}

impl fmt::Debug for DisposeBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeBlock")
            .field("items", &self.items.len())
            .finish()
    }
}
