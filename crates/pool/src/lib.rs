//! # nebula-pool
//!
//! Object-reuse pools for latency-sensitive, high-churn Nebula workloads.
//!
//! Instead of constructing a fresh value on every request, a pool hands out
//! a previously allocated instance and takes it back when the caller is
//! done. Two kernels share the same accounting (`total = inactive + active`):
//!
//! - [`MemoryPool`]: configurable capacity (initial size, max size, growth
//!   mode), factory-based construction, lifecycle hooks, `&self` API
//! - [`StaticMemoryPool`]: grows one at a time, reinitializes instances from
//!   spawn arguments, `&mut self` API suitable for a `static` behind a lock
//!
//! On top of them sit array pools, list and map pools, a type-keyed
//! singleton directory, a diagnostics registry and a scoped disposal helper.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_pool::prelude::*;
//!
//! let pool = MemoryPool::new(|| Vec::<u8>::with_capacity(4096), PoolSettings::bounded(2, 8))?;
//!
//! let mut buf = pool.spawn()?;
//! buf.extend_from_slice(b"frame");
//! buf.clear();
//! pool.despawn(buf);
//!
//! {
//!     // returned to the pool when dropped
//!     let buf = pool.spawn_pooled()?;
//!     assert!(buf.is_empty());
//! }
//! assert_eq!(pool.num_active(), 0);
//! # Ok::<(), PoolError>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `logging` (default): structured logging via `tracing`
//!
//! Pools are not internally synchronized. Share a [`StaticMemoryPool`]
//! across threads by wrapping it in a `parking_lot::Mutex`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
// Returning &str tied to &self is fine, these are accessor methods
#![allow(clippy::unnecessary_literal_bound)]
// Pool operations return Result for API consistency even when infallible today
#![allow(clippy::unnecessary_wraps)]

pub mod array;
pub mod collections;
pub mod dispose;
pub mod error;
pub mod factory;
pub mod hooks;
pub mod memory_pool;
pub mod policy;
pub mod poolable;
pub mod recycle;
pub mod registry;
pub mod settings;
pub mod singleton;
pub mod static_pool;

pub use error::{PoolError, PoolResult, Result};
pub use memory_pool::MemoryPool;
pub use recycle::{Pooled, Recycle, SharedPool};
pub use registry::{PoolRegistry, PoolStat};
pub use settings::{ExpandMethod, PoolSettings};
pub use static_pool::StaticMemoryPool;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used types
pub mod prelude {
    pub use crate::array::{ArrayPool, ArrayPools};
    pub use crate::collections::{CollectionPool, ListPool, MapPool};
    pub use crate::dispose::{Disposable, DisposeBlock};
    pub use crate::error::{PoolError, PoolResult};
    pub use crate::factory::{DefaultFactory, Factory, OptionFactory, TryFnFactory};
    pub use crate::hooks::{NoHooks, PoolHooks, ResetOnDespawn};
    pub use crate::memory_pool::MemoryPool;
    pub use crate::poolable::Poolable;
    pub use crate::recycle::{Pooled, Recycle, SharedPool};
    pub use crate::registry::{PoolRegistry, PoolStat};
    pub use crate::settings::{ExpandMethod, PoolSettings};
    pub use crate::singleton::{SingletonPools, checked_pool, singleton_map_pool};
    pub use crate::static_pool::{SpawnArgs, StaticMemoryPool};
}
