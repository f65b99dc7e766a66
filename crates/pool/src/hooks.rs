//! Lifecycle hooks for [`MemoryPool`](crate::memory_pool::MemoryPool)

use crate::poolable::Poolable;

/// Pool lifecycle hooks
///
/// Every method defaults to a no-op. Hooks must not call back into the pool
/// that invoked them.
pub trait PoolHooks<T> {
    /// Called once per factory call, before the instance is first pooled
    fn on_created(&mut self, _item: &mut T) {}

    /// Called every time an instance leaves the inactive stack
    fn on_spawned(&mut self, _item: &mut T) {}

    /// Called every time an instance enters the inactive stack
    fn on_despawned(&mut self, _item: &mut T) {}

    /// Called when an instance is permanently dropped from the pool
    fn on_destroyed(&mut self, _item: T) {}
}

/// Default no-op hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<T> PoolHooks<T> for NoHooks {}

/// Hooks that [`reset`](Poolable::reset) instances on despawn
///
/// Records the largest occupancy ever returned, which the collection pools
/// report as `peak_len`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetOnDespawn {
    peak_occupancy: usize,
}

impl ResetOnDespawn {
    /// Largest occupancy seen at despawn time
    pub fn peak_occupancy(&self) -> usize {
        self.peak_occupancy
    }
}

impl<T: Poolable> PoolHooks<T> for ResetOnDespawn {
    fn on_despawned(&mut self, item: &mut T) {
        self.peak_occupancy = self.peak_occupancy.max(item.occupancy());
        item.reset();
    }
}
