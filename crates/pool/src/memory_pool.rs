//! Configurable memory pool
//!
//! `MemoryPool` keeps inactive instances on a LIFO stack and counts the ones
//! handed out. Construction is delegated to a [`Factory`], growth follows
//! the pool's [`PoolSettings`], and [`PoolHooks`] observe every lifecycle
//! transition.

use core::any::type_name;
use core::cell::{Ref, RefCell};
use core::fmt;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

use crate::error::{PoolError, PoolResult};
use crate::factory::{DefaultFactory, Factory};
use crate::hooks::{NoHooks, PoolHooks};
use crate::policy;
use crate::recycle::{Pooled, Recycle, SharedPool};
use crate::registry::PoolStat;
use crate::settings::{ExpandMethod, PoolSettings};

/// Single-threaded pool with configurable capacity
///
/// All operations take `&self`; state lives in a `RefCell`, so the pool is
/// `!Sync` and hooks must not re-enter it.
///
/// # Example
/// ```
/// use nebula_pool::memory_pool::MemoryPool;
/// use nebula_pool::settings::PoolSettings;
///
/// let pool = MemoryPool::new(|| String::with_capacity(1024), PoolSettings::default())?;
///
/// let mut s = pool.spawn()?;
/// s.push_str("Hello, World!");
/// pool.despawn(s);
///
/// assert_eq!(pool.num_inactive(), 1);
/// # Ok::<(), nebula_pool::PoolError>(())
/// ```
pub struct MemoryPool<T, H = NoHooks> {
    name: String,
    settings: PoolSettings,
    state: RefCell<PoolState<T, H>>,
}

struct PoolState<T, H> {
    inactive: Vec<T>,
    active: usize,
    peak_active: usize,
    factory: Box<dyn Factory<T>>,
    hooks: H,
}

impl<T, H: PoolHooks<T>> PoolState<T, H> {
    fn total(&self) -> usize {
        self.inactive.len() + self.active
    }

    fn alloc_new(&mut self, pool: &str) -> PoolResult<T> {
        let mut item = self
            .factory
            .create()
            .map_err(|source| PoolError::construction_failed::<T>(pool, source))?;
        self.hooks.on_created(&mut item);
        Ok(item)
    }

    fn fill_to(&mut self, pool: &str, target: usize) -> PoolResult<()> {
        self.inactive.reserve(target.saturating_sub(self.inactive.len()));
        while self.inactive.len() < target {
            let item = self.alloc_new(pool)?;
            self.inactive.push(item);
        }
        Ok(())
    }

    fn trim_to(&mut self, target: usize) {
        while self.inactive.len() > target {
            if let Some(item) = self.inactive.pop() {
                self.hooks.on_destroyed(item);
            }
        }
    }
}

impl<T> MemoryPool<T, NoHooks> {
    /// Create a pool with a factory and settings
    pub fn new<F>(factory: F, settings: PoolSettings) -> PoolResult<Self>
    where
        F: Factory<T> + 'static,
    {
        Self::with_hooks(factory, settings, NoHooks)
    }
}

impl<T: Default> MemoryPool<T, NoHooks> {
    /// Create a pool that default-constructs its instances
    pub fn with_default(settings: PoolSettings) -> PoolResult<Self> {
        Self::new(DefaultFactory, settings)
    }
}

impl<T, H: PoolHooks<T>> MemoryPool<T, H> {
    /// Create a pool with lifecycle hooks
    ///
    /// Pre-allocates `settings.initial_size` instances, firing
    /// [`PoolHooks::on_created`] for each.
    pub fn with_hooks<F>(factory: F, settings: PoolSettings, hooks: H) -> PoolResult<Self>
    where
        F: Factory<T> + 'static,
    {
        settings.validate()?;

        let name = settings
            .label
            .clone()
            .unwrap_or_else(|| type_name::<T>().to_string());

        let mut state = PoolState {
            inactive: Vec::with_capacity(settings.initial_size),
            active: 0,
            peak_active: 0,
            factory: Box::new(factory),
            hooks,
        };
        state.fill_to(&name, settings.initial_size)?;

        #[cfg(feature = "logging")]
        debug!(
            pool = %name,
            initial_size = settings.initial_size,
            expand_method = ?settings.expand_method,
            "Memory pool created"
        );

        Ok(Self {
            name,
            settings,
            state: RefCell::new(state),
        })
    }

    /// Get an instance, growing the pool if it is empty
    ///
    /// The most recently returned instance is handed out first.
    pub fn spawn(&self) -> PoolResult<T> {
        let mut state = self.state.borrow_mut();

        if state.inactive.is_empty() {
            self.expand(&mut state)?;
        }

        let Some(mut item) = state.inactive.pop() else {
            return Err(PoolError::exhausted(&self.name, state.total()));
        };

        state.active += 1;
        state.peak_active = state.peak_active.max(state.active);
        state.hooks.on_spawned(&mut item);
        Ok(item)
    }

    /// Get an instance wrapped in a guard that returns it on drop
    pub fn spawn_pooled(&self) -> PoolResult<Pooled<'_, T>> {
        let item = self.spawn()?;
        Ok(Pooled::new(item, self))
    }

    /// Return an instance to the pool
    ///
    /// Surplus above `max_size` is destroyed immediately. The pool neither
    /// verifies that it issued `item` nor detects a second return of the
    /// same instance; callers must despawn each instance exactly once.
    pub fn despawn(&self, mut item: T) {
        let mut state = self.state.borrow_mut();

        state.active = state.active.saturating_sub(1);
        state.hooks.on_despawned(&mut item);
        state.inactive.push(item);

        if state.inactive.len() > self.settings.max_size {
            #[cfg(feature = "logging")]
            debug!(
                pool = %self.name,
                max_size = self.settings.max_size,
                "Destroying instances above max size"
            );

            state.trim_to(self.settings.max_size);
        }
    }

    /// Resize the inactive stack to exactly `target` instances
    pub fn resize(&self, target: usize) -> PoolResult<()> {
        let mut state = self.state.borrow_mut();
        self.resize_locked(&mut state, target)
    }

    /// Add `count` inactive instances
    pub fn expand_by(&self, count: usize) -> PoolResult<()> {
        let mut state = self.state.borrow_mut();
        let Some(target) = state.inactive.len().checked_add(count) else {
            return Err(PoolError::invalid_resize(
                &self.name,
                isize::MAX,
                "pool size overflow",
            ));
        };
        self.resize_locked(&mut state, target)
    }

    /// Destroy `count` inactive instances
    pub fn shrink_by(&self, count: usize) -> PoolResult<()> {
        let mut state = self.state.borrow_mut();
        let current = state.inactive.len();
        let Some(target) = current.checked_sub(count) else {
            return Err(PoolError::negative_resize(&self.name, current, count));
        };
        self.resize_locked(&mut state, target)
    }

    /// Destroy every inactive instance
    pub fn clear(&self) -> PoolResult<()> {
        self.resize(0)
    }

    /// Instances owned by the pool or its callers
    pub fn num_total(&self) -> usize {
        self.state.borrow().total()
    }

    /// Instances currently handed out
    pub fn num_active(&self) -> usize {
        self.state.borrow().active
    }

    /// Instances waiting on the stack
    pub fn num_inactive(&self) -> usize {
        self.state.borrow().inactive.len()
    }

    /// Highest active count observed
    pub fn peak_active(&self) -> usize {
        self.state.borrow().peak_active
    }

    /// Pool label (type name unless configured)
    pub fn label(&self) -> &str {
        &self.name
    }

    /// Pool settings
    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Borrow the pool's hooks
    pub fn hooks(&self) -> Ref<'_, H> {
        Ref::map(self.state.borrow(), |state| &state.hooks)
    }

    /// Visit inactive instances, most recently returned first
    pub fn for_each_inactive(&self, mut f: impl FnMut(&T)) {
        self.state.borrow().inactive.iter().rev().for_each(|item| f(item));
    }

    fn expand(&self, state: &mut PoolState<T, H>) -> PoolResult<()> {
        let total = state.total();
        let Some(count) = policy::growth(total, &self.settings) else {
            return Err(PoolError::exhausted(&self.name, total));
        };

        #[cfg(feature = "logging")]
        trace!(pool = %self.name, total, count, "Expanding empty pool");

        let target = state.inactive.len() + count;
        state.fill_to(&self.name, target)
    }

    fn resize_locked(&self, state: &mut PoolState<T, H>, target: usize) -> PoolResult<()> {
        let current = state.inactive.len();
        if current == target {
            return Ok(());
        }

        // Fixed pools report their fixed size before any bound is checked
        if self.settings.expand_method == ExpandMethod::Disabled {
            return Err(PoolError::fixed_capacity(&self.name, current, target));
        }

        if target > self.settings.max_size {
            return Err(PoolError::invalid_resize(
                &self.name,
                isize::try_from(target).unwrap_or(isize::MAX),
                "exceeds max size",
            ));
        }

        state.trim_to(target);
        state.fill_to(&self.name, target)?;

        assert_eq!(
            state.inactive.len(),
            target,
            "pool '{}' ended resize with the wrong inactive count",
            self.name
        );

        #[cfg(feature = "logging")]
        debug!(
            pool = %self.name,
            from = current,
            to = target,
            active = state.active,
            "Memory pool resized"
        );

        Ok(())
    }
}

impl<T, H: PoolHooks<T>> Recycle<T> for MemoryPool<T, H> {
    fn recycle(&self, item: T) {
        self.despawn(item);
    }
}

impl<T, H: PoolHooks<T>> SharedPool<T> for MemoryPool<T, H> {
    fn spawn_shared(&self, (): ()) -> PoolResult<T> {
        self.spawn()
    }
}

impl<T, H: PoolHooks<T>> PoolStat for MemoryPool<T, H> {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> String {
        let state = self.state.borrow();
        format!(
            "total={} active={} inactive={} peak_active={}",
            state.total(),
            state.active,
            state.inactive.len(),
            state.peak_active
        )
    }
}

impl<T, H> fmt::Debug for MemoryPool<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("MemoryPool");
        dbg.field("name", &self.name).field("settings", &self.settings);
        if let Ok(state) = self.state.try_borrow() {
            dbg.field("active", &state.active)
                .field("inactive", &state.inactive.len());
        }
        dbg.finish_non_exhaustive()
    }
}
