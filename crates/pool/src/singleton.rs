//! One shared pool per type
//!
//! [`SingletonPools`] is a directory keyed by the pool's type. The first
//! request for a type creates its pool; every later request reaches the same
//! one. The directory sits behind a `parking_lot::Mutex` so it can live in a
//! `static`, and the lock is held while the caller's closure runs.

use core::any::{Any, TypeId, type_name};
use core::fmt;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::LazyLock;

use parking_lot::Mutex;
#[cfg(feature = "logging")]
use tracing::debug;

use crate::error::PoolError;
use crate::poolable::Poolable;
use crate::static_pool::StaticMemoryPool;

/// Kernel B pool of maps as handed out by [`singleton_map_pool`]
pub type MapStaticPool<K, V> = StaticMemoryPool<HashMap<K, V>>;

/// Build a pool whose instances are [`reset`](Poolable::reset) on return
///
/// Spawning fails with [`PoolError::DirtyInstance`] if a recycled instance
/// is not [`is_reset`](Poolable::is_reset), which can only happen when a
/// caller mutated it after returning it.
pub fn checked_pool<C>() -> StaticMemoryPool<C>
where
    C: Poolable + Default + Send + 'static,
{
    let mut pool = StaticMemoryPool::with_allocator(C::default);
    pool.set_on_spawn(|(), item: &mut C| {
        if item.is_reset() {
            Ok(())
        } else {
            Err(PoolError::dirty_instance(type_name::<C>()))
        }
    });
    pool.set_on_despawn(C::reset);
    pool
}

/// Build a pool of maps that are cleared on return
pub fn singleton_map_pool<K, V>() -> MapStaticPool<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    checked_pool()
}

/// Type-keyed directory of shared pools
#[derive(Default)]
pub struct SingletonPools {
    pools: Mutex<HashMap<TypeId, Box<dyn Any + Send>>>,
}

impl SingletonPools {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide directory
    pub fn global() -> &'static Self {
        static GLOBAL: LazyLock<SingletonPools> = LazyLock::new(SingletonPools::new);
        &GLOBAL
    }

    /// Run `f` on the pool of type `P`, creating it with `init` on first use
    pub fn with<P, R>(&self, init: impl FnOnce() -> P, f: impl FnOnce(&mut P) -> R) -> R
    where
        P: Send + 'static,
    {
        let mut pools = self.pools.lock();
        let slot = pools.entry(TypeId::of::<P>()).or_insert_with(|| {
            #[cfg(feature = "logging")]
            debug!(pool = type_name::<P>(), "Creating singleton pool");

            Box::new(init())
        });

        let Some(pool) = slot.downcast_mut::<P>() else {
            unreachable!("singleton slot for {} holds another type", type_name::<P>());
        };
        f(pool)
    }

    /// Run `f` on the shared pool of `HashMap<K, V>`
    pub fn with_map_pool<K, V, R>(&self, f: impl FnOnce(&mut MapStaticPool<K, V>) -> R) -> R
    where
        K: Eq + Hash + Send + 'static,
        V: Send + 'static,
    {
        self.with(singleton_map_pool::<K, V>, f)
    }

    /// Number of pools created so far
    pub fn len(&self) -> usize {
        self.pools.lock().len()
    }

    /// Check if no pool has been created yet
    pub fn is_empty(&self) -> bool {
        self.pools.lock().is_empty()
    }
}

impl fmt::Debug for SingletonPools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonPools")
            .field("pools", &self.len())
            .finish()
    }
}
