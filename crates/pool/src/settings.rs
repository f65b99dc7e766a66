//! Capacity configuration for [`MemoryPool`](crate::memory_pool::MemoryPool)

use crate::error::{PoolError, PoolResult};

/// What a pool does when `spawn` finds no inactive instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpandMethod {
    /// Allocate a single new instance
    #[default]
    OneAtATime,
    /// Double the total size (or allocate one if the pool is empty)
    Double,
    /// No growth: spawning from an empty pool fails
    Disabled,
}

/// Configuration for memory pools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Number of instances allocated eagerly at construction
    pub initial_size: usize,

    /// Upper bound on inactive instances (`usize::MAX` for unbounded)
    pub max_size: usize,

    /// Growth strategy when the pool is empty
    pub expand_method: ExpandMethod,

    /// Label used in errors, logs and diagnostics
    pub label: Option<String>,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            initial_size: 0,
            max_size: usize::MAX,
            expand_method: ExpandMethod::OneAtATime,
            label: None,
        }
    }
}

impl PoolSettings {
    /// Create settings with explicit values
    pub fn new(initial_size: usize, max_size: usize, expand_method: ExpandMethod) -> Self {
        Self {
            initial_size,
            max_size,
            expand_method,
            label: None,
        }
    }

    /// Create a fixed-size pool configuration
    pub fn fixed(size: usize) -> Self {
        Self::new(size, size, ExpandMethod::Disabled)
    }

    /// Create a bounded, one-at-a-time pool configuration
    pub fn bounded(initial_size: usize, max_size: usize) -> Self {
        Self::new(initial_size, max_size, ExpandMethod::OneAtATime)
    }

    /// Create an unbounded doubling pool configuration
    pub fn doubling() -> Self {
        Self::default().with_expand_method(ExpandMethod::Double)
    }

    /// Set initial size
    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Set maximum size
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set expand method
    pub fn with_expand_method(mut self, expand_method: ExpandMethod) -> Self {
        self.expand_method = expand_method;
        self
    }

    /// Set label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether the pool has no maximum size
    pub fn is_unbounded(&self) -> bool {
        self.max_size == usize::MAX
    }

    /// Check that the settings describe a constructible pool
    pub fn validate(&self) -> PoolResult<()> {
        if self.initial_size > self.max_size {
            return Err(PoolError::invalid_config(&format!(
                "initial size {} exceeds max size {}",
                self.initial_size, self.max_size
            )));
        }
        Ok(())
    }
}
