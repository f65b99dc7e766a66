//! List and map pools with diagnostics

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::PoolResult;
use crate::hooks::ResetOnDespawn;
use crate::memory_pool::MemoryPool;
use crate::poolable::Poolable;
use crate::recycle::{Pooled, Recycle, SharedPool};
use crate::registry::{PoolRegistry, PoolStat};
use crate::settings::PoolSettings;

/// Pool of `Vec<T>`
pub type ListPool<T> = CollectionPool<Vec<T>>;

/// Pool of `HashMap<K, V>`
pub type MapPool<K, V> = CollectionPool<HashMap<K, V>>;

/// Pool of collections that are cleared on return
///
/// Returned collections keep their allocated capacity. The pool tracks the
/// largest length ever returned so undersized capacity hints show up in
/// the diagnostics report.
///
/// # Example
/// ```
/// use nebula_pool::collections::ListPool;
/// use nebula_pool::registry::PoolRegistry;
///
/// let registry = PoolRegistry::new();
/// let pool = ListPool::<u32>::labeled("ids", &registry)?;
///
/// let mut ids = pool.spawn()?;
/// ids.extend([1, 2, 3]);
/// pool.despawn(ids);
///
/// assert_eq!(
///     registry.report(),
///     "ids: total=1 active=0 inactive=1 peak_active=1 peak_len=3"
/// );
/// # Ok::<(), nebula_pool::PoolError>(())
/// ```
#[derive(Debug)]
pub struct CollectionPool<C> {
    inner: MemoryPool<C, ResetOnDespawn>,
}

impl<C: Poolable + 'static> CollectionPool<C> {
    /// Create a pool whose new collections reserve `initial_capacity`
    pub fn create(settings: PoolSettings, initial_capacity: usize) -> PoolResult<Self> {
        let inner = MemoryPool::with_hooks(
            move || C::with_capacity_hint(initial_capacity),
            settings,
            ResetOnDespawn::default(),
        )?;
        Ok(Self { inner })
    }

    /// Create an unbounded, labeled pool and register it for diagnostics
    pub fn labeled(label: impl Into<String>, registry: &PoolRegistry) -> PoolResult<Rc<Self>> {
        let pool = Rc::new(Self::create(PoolSettings::default().with_label(label), 0)?);
        registry.register(pool.clone());
        Ok(pool)
    }
}

impl<C: Poolable> CollectionPool<C> {
    /// Get a cleared collection
    pub fn spawn(&self) -> PoolResult<C> {
        self.inner.spawn()
    }

    /// Get a collection wrapped in a guard that returns it on drop
    pub fn spawn_pooled(&self) -> PoolResult<Pooled<'_, C>> {
        self.inner.spawn_pooled()
    }

    /// Clear a collection and return it to the pool
    pub fn despawn(&self, collection: C) {
        self.inner.despawn(collection);
    }

    /// Resize the inactive stack to exactly `target` collections
    pub fn resize(&self, target: usize) -> PoolResult<()> {
        self.inner.resize(target)
    }

    /// Add `count` inactive collections
    pub fn expand_by(&self, count: usize) -> PoolResult<()> {
        self.inner.expand_by(count)
    }

    /// Destroy `count` inactive collections
    pub fn shrink_by(&self, count: usize) -> PoolResult<()> {
        self.inner.shrink_by(count)
    }

    /// Destroy every inactive collection
    pub fn clear(&self) -> PoolResult<()> {
        self.inner.clear()
    }

    /// Collections owned by the pool or its callers
    pub fn num_total(&self) -> usize {
        self.inner.num_total()
    }

    /// Collections currently handed out
    pub fn num_active(&self) -> usize {
        self.inner.num_active()
    }

    /// Collections waiting on the stack
    pub fn num_inactive(&self) -> usize {
        self.inner.num_inactive()
    }

    /// Highest active count observed
    pub fn peak_active(&self) -> usize {
        self.inner.peak_active()
    }

    /// Largest length of any collection returned so far
    pub fn peak_len(&self) -> usize {
        self.inner.hooks().peak_occupancy()
    }

    /// Pool label
    pub fn label(&self) -> &str {
        self.inner.label()
    }
}

impl<C: Poolable> Recycle<C> for CollectionPool<C> {
    fn recycle(&self, item: C) {
        self.despawn(item);
    }
}

impl<C: Poolable> SharedPool<C> for CollectionPool<C> {
    fn spawn_shared(&self, (): ()) -> PoolResult<C> {
        self.spawn()
    }
}

impl<C: Poolable> PoolStat for CollectionPool<C> {
    fn label(&self) -> String {
        self.inner.label().to_string()
    }

    fn status(&self) -> String {
        format!("{} peak_len={}", self.inner.status(), self.peak_len())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_list_cleared_on_return() {
        let pool = ListPool::<u32>::create(PoolSettings::default(), 16).unwrap();

        let mut list = pool.spawn().unwrap();
        assert!(list.capacity() >= 16);
        list.extend([1, 2, 3]);
        pool.despawn(list);

        let list = pool.spawn().unwrap();
        assert!(list.is_empty());
        assert!(list.capacity() >= 16);
    }

    #[test]
    fn test_map_pool_peak_len() {
        let pool = MapPool::<&str, u32>::create(PoolSettings::default(), 0).unwrap();

        let mut a = pool.spawn().unwrap();
        let mut b = pool.spawn().unwrap();
        a.insert("x", 1);
        b.extend([("x", 1), ("y", 2)]);
        pool.despawn(a);
        pool.despawn(b);

        assert_eq!(pool.peak_len(), 2);
        assert_eq!(pool.peak_active(), 2);
    }

    #[test]
    fn test_labeled_registers() {
        let registry = PoolRegistry::new();
        let lists = ListPool::<u8>::labeled("lists", &registry).unwrap();
        let maps = MapPool::<u8, u8>::labeled("maps", &registry).unwrap();

        let list = lists.spawn().unwrap();
        drop(maps.spawn_pooled().unwrap());

        assert_eq!(
            registry.report(),
            "lists: total=1 active=1 inactive=0 peak_active=1 peak_len=0\n\
             maps: total=1 active=0 inactive=1 peak_active=1 peak_len=0"
        );
        lists.despawn(list);
    }
}
