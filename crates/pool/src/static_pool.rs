//! Static-style pool with parameterized spawn
//!
//! `StaticMemoryPool` grows one instance at a time, never refuses a spawn
//! for capacity reasons, and reinitializes instances through an on-spawn
//! callback that receives the spawn arguments as a tuple. It takes
//! `&mut self` and is `Send` whenever `T` is, so a long-lived shared pool is
//! declared behind a lock:
//!
//! ```
//! use std::sync::LazyLock;
//!
//! use nebula_pool::static_pool::StaticMemoryPool;
//! use parking_lot::Mutex;
//!
//! #[derive(Default)]
//! struct Message {
//!     body: Option<String>,
//! }
//!
//! static MESSAGES: LazyLock<Mutex<StaticMemoryPool<Message, (String,)>>> = LazyLock::new(|| {
//!     let pool = StaticMemoryPool::builder()
//!         .on_spawn(|(body,): (String,), msg: &mut Message| {
//!             msg.body = Some(body);
//!             Ok(())
//!         })
//!         .on_despawn(|msg: &mut Message| msg.body = None)
//!         .build()
//!         .expect("on-spawn callback is set");
//!     Mutex::new(pool)
//! });
//!
//! let msg = MESSAGES.lock().spawn_with(("hello".to_string(),))?;
//! assert_eq!(msg.body.as_deref(), Some("hello"));
//! MESSAGES.lock().despawn(msg);
//! # Ok::<(), nebula_pool::PoolError>(())
//! ```

use core::any::type_name;
use core::cell::RefCell;
use core::fmt;

use parking_lot::Mutex;
#[cfg(feature = "logging")]
use tracing::debug;

use crate::error::{PoolError, PoolResult};
use crate::recycle::{Recycle, SharedPool};
use crate::registry::PoolStat;

/// Argument tuple accepted by [`StaticMemoryPool::spawn_with`]
///
/// Implemented for tuples of zero to seven elements.
pub trait SpawnArgs {
    /// Number of arguments in the tuple
    const ARITY: usize;
}

macro_rules! impl_spawn_args {
    ($arity:literal; $($param:ident),*) => {
        impl<$($param),*> SpawnArgs for ($($param,)*) {
            const ARITY: usize = $arity;
        }
    };
}

impl_spawn_args!(0;);
impl_spawn_args!(1; P1);
impl_spawn_args!(2; P1, P2);
impl_spawn_args!(3; P1, P2, P3);
impl_spawn_args!(4; P1, P2, P3, P4);
impl_spawn_args!(5; P1, P2, P3, P4, P5);
impl_spawn_args!(6; P1, P2, P3, P4, P5, P6);
impl_spawn_args!(7; P1, P2, P3, P4, P5, P6, P7);

type Allocator<T> = Box<dyn FnMut() -> T + Send>;
type SpawnCallback<T, A> = Box<dyn FnMut(A, &mut T) -> PoolResult<()> + Send>;
type DespawnCallback<T> = Box<dyn FnMut(&mut T) + Send>;

/// Pool that grows on demand and reinitializes through callbacks
pub struct StaticMemoryPool<T, A = ()> {
    name: String,
    inactive: Vec<T>,
    active: usize,
    peak_active: usize,
    allocator: Allocator<T>,
    on_spawn: Option<SpawnCallback<T, A>>,
    on_despawn: Option<DespawnCallback<T>>,
}

/// Builder for [`StaticMemoryPool`]
pub struct StaticPoolBuilder<T, A = ()> {
    label: Option<String>,
    allocator: Allocator<T>,
    on_spawn: Option<SpawnCallback<T, A>>,
    on_despawn: Option<DespawnCallback<T>>,
}

impl<T, A> StaticPoolBuilder<T, A> {
    /// Set the callback that reinitializes an instance from spawn arguments
    pub fn on_spawn<F>(mut self, on_spawn: F) -> Self
    where
        F: FnMut(A, &mut T) -> PoolResult<()> + Send + 'static,
    {
        self.on_spawn = Some(Box::new(on_spawn));
        self
    }

    /// Set the callback run on every returned instance
    pub fn on_despawn<F>(mut self, on_despawn: F) -> Self
    where
        F: FnMut(&mut T) + Send + 'static,
    {
        self.on_despawn = Some(Box::new(on_despawn));
        self
    }

    /// Set the label used in errors and diagnostics
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl<T, A: SpawnArgs> StaticPoolBuilder<T, A> {
    /// Build the pool
    ///
    /// A pool whose spawn takes arguments has no other way to use them, so
    /// building one without an on-spawn callback fails.
    pub fn build(self) -> PoolResult<StaticMemoryPool<T, A>> {
        let name = self.label.unwrap_or_else(|| type_name::<T>().to_string());

        if A::ARITY > 0 && self.on_spawn.is_none() {
            return Err(PoolError::missing_spawn_callback(&name, A::ARITY));
        }

        Ok(StaticMemoryPool {
            name,
            inactive: Vec::new(),
            active: 0,
            peak_active: 0,
            allocator: self.allocator,
            on_spawn: self.on_spawn,
            on_despawn: self.on_despawn,
        })
    }
}

impl<T: Default + 'static> StaticMemoryPool<T, ()> {
    /// Create a zero-argument pool without callbacks
    pub fn new() -> Self {
        Self::with_allocator(T::default)
    }
}

impl<T: Default + 'static> Default for StaticMemoryPool<T, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StaticMemoryPool<T, ()> {
    /// Create a zero-argument pool with a custom allocator and no callbacks
    pub fn with_allocator<F>(allocator: F) -> Self
    where
        F: FnMut() -> T + Send + 'static,
    {
        Self {
            name: type_name::<T>().to_string(),
            inactive: Vec::new(),
            active: 0,
            peak_active: 0,
            allocator: Box::new(allocator),
            on_spawn: None,
            on_despawn: None,
        }
    }

    /// Get an instance
    pub fn spawn(&mut self) -> PoolResult<T> {
        self.spawn_with(())
    }
}

impl<T: Default + 'static, A> StaticMemoryPool<T, A> {
    /// Start building a pool that default-constructs its instances
    pub fn builder() -> StaticPoolBuilder<T, A> {
        Self::builder_with_allocator(T::default)
    }
}

impl<T, A> StaticMemoryPool<T, A> {
    /// Start building a pool with a custom allocator
    pub fn builder_with_allocator<F>(allocator: F) -> StaticPoolBuilder<T, A>
    where
        F: FnMut() -> T + Send + 'static,
    {
        StaticPoolBuilder {
            label: None,
            allocator: Box::new(allocator),
            on_spawn: None,
            on_despawn: None,
        }
    }

    /// Get an instance and reinitialize it from `args`
    ///
    /// If the on-spawn callback fails, the instance is dropped instead of
    /// being handed out and the error is returned.
    pub fn spawn_with(&mut self, args: A) -> PoolResult<T> {
        let mut item = self.spawn_internal();

        if let Some(on_spawn) = self.on_spawn.as_mut() {
            if let Err(err) = on_spawn(args, &mut item) {
                self.active -= 1;
                return Err(err);
            }
        }

        Ok(item)
    }

    /// Pop or allocate an instance without running the on-spawn callback
    pub(crate) fn spawn_internal(&mut self) -> T {
        let item = match self.inactive.pop() {
            Some(item) => item,
            None => (self.allocator)(),
        };

        self.active += 1;
        self.peak_active = self.peak_active.max(self.active);
        item
    }

    /// Return an instance to the pool
    ///
    /// The on-despawn callback runs first. The pool neither verifies that it
    /// issued `item` nor detects a second return of the same instance.
    pub fn despawn(&mut self, mut item: T) {
        if let Some(on_despawn) = self.on_despawn.as_mut() {
            on_despawn(&mut item);
        }

        self.active = self.active.saturating_sub(1);
        self.inactive.push(item);
    }

    /// Resize the inactive stack to exactly `target` instances
    pub fn resize(&mut self, target: usize) -> PoolResult<()> {
        let current = self.inactive.len();

        self.inactive.truncate(target);
        self.inactive.reserve(target.saturating_sub(current));
        while self.inactive.len() < target {
            let item = (self.allocator)();
            self.inactive.push(item);
        }

        assert_eq!(
            self.inactive.len(),
            target,
            "pool '{}' ended resize with the wrong inactive count",
            self.name
        );

        #[cfg(feature = "logging")]
        if current != target {
            debug!(pool = %self.name, from = current, to = target, "Static pool resized");
        }

        Ok(())
    }

    /// Add `count` inactive instances
    pub fn expand_by(&mut self, count: usize) -> PoolResult<()> {
        let Some(target) = self.inactive.len().checked_add(count) else {
            return Err(PoolError::invalid_resize(
                &self.name,
                isize::MAX,
                "pool size overflow",
            ));
        };
        self.resize(target)
    }

    /// Drop `count` inactive instances
    pub fn shrink_by(&mut self, count: usize) -> PoolResult<()> {
        let current = self.inactive.len();
        let Some(target) = current.checked_sub(count) else {
            return Err(PoolError::negative_resize(&self.name, current, count));
        };
        self.resize(target)
    }

    /// Drop every inactive instance
    pub fn clear(&mut self) -> PoolResult<()> {
        self.resize(0)
    }

    /// Force the active count to zero without touching the stack
    ///
    /// Instances still held by callers are forgotten by the accounting.
    /// Meant for tests and hard resets of shared pools.
    pub fn clear_active_count(&mut self) {
        self.active = 0;
    }

    /// Replace the on-spawn callback
    pub fn set_on_spawn<F>(&mut self, on_spawn: F)
    where
        F: FnMut(A, &mut T) -> PoolResult<()> + Send + 'static,
    {
        self.on_spawn = Some(Box::new(on_spawn));
    }

    /// Replace the on-despawn callback
    pub fn set_on_despawn<F>(&mut self, on_despawn: F)
    where
        F: FnMut(&mut T) + Send + 'static,
    {
        self.on_despawn = Some(Box::new(on_despawn));
    }

    /// Instances owned by the pool or its callers
    pub fn num_total(&self) -> usize {
        self.inactive.len() + self.active
    }

    /// Instances currently handed out
    pub fn num_active(&self) -> usize {
        self.active
    }

    /// Instances waiting on the stack
    pub fn num_inactive(&self) -> usize {
        self.inactive.len()
    }

    /// Highest active count observed
    pub fn peak_active(&self) -> usize {
        self.peak_active
    }

    /// Pool label (type name unless configured)
    pub fn label(&self) -> &str {
        &self.name
    }
}

impl<T, A> PoolStat for StaticMemoryPool<T, A> {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> String {
        format!(
            "total={} active={} inactive={} peak_active={}",
            self.num_total(),
            self.active,
            self.inactive.len(),
            self.peak_active
        )
    }
}

impl<T, A> fmt::Debug for StaticMemoryPool<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMemoryPool")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("inactive", &self.inactive.len())
            .finish_non_exhaustive()
    }
}

impl<T, A> fmt::Debug for StaticPoolBuilder<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticPoolBuilder")
            .field("label", &self.label)
            .field("on_spawn", &self.on_spawn.is_some())
            .field("on_despawn", &self.on_despawn.is_some())
            .finish_non_exhaustive()
    }
}

// Shared handles: single-threaded owners use `RefCell`, statics use `Mutex`.

impl<T, A> Recycle<T> for RefCell<StaticMemoryPool<T, A>> {
    fn recycle(&self, item: T) {
        self.borrow_mut().despawn(item);
    }
}

impl<T, A> SharedPool<T, A> for RefCell<StaticMemoryPool<T, A>> {
    fn spawn_shared(&self, args: A) -> PoolResult<T> {
        self.borrow_mut().spawn_with(args)
    }
}

impl<T, A> PoolStat for RefCell<StaticMemoryPool<T, A>> {
    fn label(&self) -> String {
        self.borrow().name.clone()
    }

    fn status(&self) -> String {
        self.borrow().status()
    }
}

impl<T, A> Recycle<T> for Mutex<StaticMemoryPool<T, A>> {
    fn recycle(&self, item: T) {
        self.lock().despawn(item);
    }
}

impl<T, A> SharedPool<T, A> for Mutex<StaticMemoryPool<T, A>> {
    fn spawn_shared(&self, args: A) -> PoolResult<T> {
        self.lock().spawn_with(args)
    }
}

impl<T, A> PoolStat for Mutex<StaticMemoryPool<T, A>> {
    fn label(&self) -> String {
        self.lock().name.clone()
    }

    fn status(&self) -> String {
        self.lock().status()
    }
}
