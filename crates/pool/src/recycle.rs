//! Type-erased return capability and the RAII [`Pooled`] guard
//!
//! # Safety
//!
//! `Pooled` keeps its item in a `ManuallyDrop` so that `Drop` can move it
//! back into the owning pool:
//! - the item is initialized in `Pooled::new` and taken exactly once, either
//!   in `Drop::drop` or in `detach`
//! - `detach` wraps the guard in `ManuallyDrop` before taking the item, so
//!   `Drop` never runs on a taken slot
#![allow(unsafe_code)]

use core::fmt;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};

use crate::error::PoolResult;

/// Capability to take an instance back into the pool that issued it.
///
/// Implemented by every concrete pool so helpers can hold heterogeneous
/// "return this instance" obligations without knowing the pool type.
pub trait Recycle<T> {
    /// Return `item` to the pool
    ///
    /// The pool does not check that it issued `item`, nor that `item` is
    /// returned only once.
    fn recycle(&self, item: T);
}

/// A pool that can be spawned from through a shared reference.
pub trait SharedPool<T, A = ()>: Recycle<T> {
    /// Spawn an instance, passing `args` to the pool's spawn logic
    fn spawn_shared(&self, args: A) -> PoolResult<T>;

    /// Spawn an instance wrapped in a guard that returns it on drop
    fn spawn_pooled_with(&self, args: A) -> PoolResult<Pooled<'_, T>>
    where
        Self: Sized,
    {
        let item = self.spawn_shared(args)?;
        Ok(Pooled::new(item, self))
    }
}

/// RAII wrapper for pooled values
///
/// Derefs to the instance and returns it to its pool when dropped.
pub struct Pooled<'a, T> {
    item: ManuallyDrop<T>,
    pool: &'a dyn Recycle<T>,
}

impl<'a, T> Pooled<'a, T> {
    /// Wrap an already spawned instance
    pub fn new(item: T, pool: &'a dyn Recycle<T>) -> Self {
        Self {
            item: ManuallyDrop::new(item),
            pool,
        }
    }

    /// Return the instance to its pool now
    pub fn dispose(self) {
        drop(self);
    }

    /// Detach value from pool (won't be returned)
    ///
    /// The pool keeps counting the instance as active.
    pub fn detach(self) -> T {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: the item was initialized in `new` and is taken only here;
        // wrapping the guard in `ManuallyDrop` keeps `Drop` from taking it
        // a second time.
        unsafe { ManuallyDrop::take(&mut this.item) }
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.item
    }
}

impl<T> AsRef<T> for Pooled<'_, T> {
    fn as_ref(&self) -> &T {
        &self.item
    }
}

impl<T> AsMut<T> for Pooled<'_, T> {
    fn as_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T: fmt::Debug> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&*self.item).finish()
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        // SAFETY: the item is initialized and `detach` (the only other taker)
        // suppresses this drop, so this is the single take.
        let item = unsafe { ManuallyDrop::take(&mut self.item) };
        self.pool.recycle(item);
    }
}
