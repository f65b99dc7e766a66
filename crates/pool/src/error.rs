//! Standalone error types for nebula-pool
//!
//! Uses thiserror for clean, idiomatic Rust error definitions.

use std::sync::Arc;

use thiserror::Error;

#[cfg(feature = "logging")]
use tracing::warn;

/// Error produced by a [`Factory`](crate::factory::Factory) implementation.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Main Error Types
// ============================================================================

/// Pool errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum PoolError {
    // --- Construction Errors ---
    /// Factory failed or produced no value
    #[error("Error during construction of '{type_name}' via pool '{pool}': {source}")]
    ConstructionFailed {
        /// Pool label
        pool: String,
        /// Instance type
        type_name: &'static str,
        /// Factory error
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Settings rejected at construction
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was rejected
        reason: String,
    },

    /// Parameterized pool built without an on-spawn callback
    #[error("Pool '{pool}' takes {arity} spawn argument(s) but has no on-spawn callback")]
    MissingSpawnCallback {
        /// Pool label
        pool: String,
        /// Number of spawn arguments
        arity: usize,
    },

    // --- Capacity Errors ---
    /// Spawn on an empty pool that cannot grow
    #[error("Pool '{pool}' exceeded its fixed size of {capacity}")]
    Exhausted {
        /// Pool label
        pool: String,
        /// Instances owned when growth was refused
        capacity: usize,
    },

    /// Resize target below zero or above max size
    #[error("Pool '{pool}' cannot be resized to {requested}: {reason}")]
    InvalidResize {
        /// Pool label
        pool: String,
        /// Requested inactive count, negative when shrinking past zero
        requested: isize,
        /// Why the target was rejected
        reason: &'static str,
    },

    /// Resize of a fixed-size pool
    #[error("Pool '{pool}' attempted resize to {requested} but is set to a fixed size of {size}")]
    FixedCapacity {
        /// Pool label
        pool: String,
        /// Current inactive count
        size: usize,
        /// Requested inactive count
        requested: usize,
    },

    // --- Contract Errors ---
    /// Recycled instance still holds state
    #[error("Pool '{pool}' recycled an instance that was not cleared on despawn")]
    DirtyInstance {
        /// Pool label
        pool: String,
    },

    /// Caller broke a pool contract
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        /// What the caller did wrong
        reason: String,
    },
}

impl PoolError {
    /// Check if error is retryable
    ///
    /// Only exhaustion qualifies: another caller may return an instance.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConstructionFailed { .. } => "POOL:CONSTRUCT:FAILED",
            Self::InvalidConfig { .. } => "POOL:CONFIG:INVALID",
            Self::MissingSpawnCallback { .. } => "POOL:CONFIG:CALLBACK",
            Self::Exhausted { .. } => "POOL:CAPACITY:EXHAUSTED",
            Self::InvalidResize { .. } => "POOL:CAPACITY:RESIZE",
            Self::FixedCapacity { .. } => "POOL:CAPACITY:FIXED",
            Self::DirtyInstance { .. } => "POOL:CONTRACT:DIRTY",
            Self::InvalidOperation { .. } => "POOL:CONTRACT:INVALID_OP",
        }
    }

    // ============================================================================
    // Convenience Constructors
    // ============================================================================

    /// Create construction failed error from a factory error
    pub fn construction_failed<T>(pool: &str, source: FactoryError) -> Self {
        let type_name = core::any::type_name::<T>();

        #[cfg(feature = "logging")]
        warn!(pool, type_name, error = %source, "Pool factory failed");

        Self::ConstructionFailed {
            pool: pool.to_string(),
            type_name,
            source: Arc::from(source),
        }
    }

    /// Create invalid config error
    pub fn invalid_config(reason: &str) -> Self {
        Self::InvalidConfig {
            reason: reason.to_string(),
        }
    }

    /// Create missing spawn callback error
    pub fn missing_spawn_callback(pool: &str, arity: usize) -> Self {
        Self::MissingSpawnCallback {
            pool: pool.to_string(),
            arity,
        }
    }

    /// Create pool exhausted error
    pub fn exhausted(pool: &str, capacity: usize) -> Self {
        #[cfg(feature = "logging")]
        warn!(pool, capacity, "Pool exhausted");

        Self::Exhausted {
            pool: pool.to_string(),
            capacity,
        }
    }

    /// Create invalid resize error
    pub fn invalid_resize(pool: &str, requested: isize, reason: &'static str) -> Self {
        Self::InvalidResize {
            pool: pool.to_string(),
            requested,
            reason,
        }
    }

    /// Create a negative resize error for `current - removed`
    pub fn negative_resize(pool: &str, current: usize, removed: usize) -> Self {
        let requested = isize::try_from(current)
            .unwrap_or(isize::MAX)
            .saturating_sub(isize::try_from(removed).unwrap_or(isize::MAX));
        Self::invalid_resize(pool, requested, "negative pool size")
    }

    /// Create fixed capacity error
    #[must_use]
    pub fn fixed_capacity(pool: &str, size: usize, requested: usize) -> Self {
        Self::FixedCapacity {
            pool: pool.to_string(),
            size,
            requested,
        }
    }

    /// Create dirty instance error
    pub fn dirty_instance(pool: &str) -> Self {
        #[cfg(feature = "logging")]
        warn!(pool, "Recycled instance was not cleared on despawn");

        Self::DirtyInstance {
            pool: pool.to_string(),
        }
    }

    /// Create invalid operation error
    pub fn invalid_operation(reason: &str) -> Self {
        Self::InvalidOperation {
            reason: reason.to_string(),
        }
    }

    /// Check if this is a resize error (negative, above max or fixed)
    #[must_use]
    pub fn is_resize_error(&self) -> bool {
        matches!(self, Self::InvalidResize { .. } | Self::FixedCapacity { .. })
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for pool operations
pub type PoolResult<T> = core::result::Result<T, PoolError>;

/// Generic result type alias
pub type Result<T> = PoolResult<T>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_failed_keeps_source() {
        use std::error::Error as _;

        let error = PoolError::construction_failed::<String>("strings", "disk on fire".into());
        assert!(error.to_string().contains("alloc::string::String"));
        assert!(error.to_string().contains("strings"));
        assert_eq!(error.source().map(ToString::to_string).as_deref(), Some("disk on fire"));
    }

    #[test]
    fn test_negative_resize_reports_target() {
        let error = PoolError::negative_resize("frames", 2, 5);
        match error {
            PoolError::InvalidResize { requested, .. } => assert_eq!(requested, -3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PoolError::exhausted("test", 2).code(), "POOL:CAPACITY:EXHAUSTED");
        assert_eq!(PoolError::fixed_capacity("test", 2, 3).code(), "POOL:CAPACITY:FIXED");
        assert_eq!(PoolError::dirty_instance("test").code(), "POOL:CONTRACT:DIRTY");
    }

    #[test]
    fn test_retryable() {
        assert!(PoolError::exhausted("test", 100).is_retryable());
        assert!(!PoolError::invalid_config("bad").is_retryable());
    }

    #[test]
    fn test_resize_errors() {
        assert!(PoolError::negative_resize("test", 0, 1).is_resize_error());
        assert!(PoolError::fixed_capacity("test", 2, 4).is_resize_error());
        assert!(!PoolError::exhausted("test", 2).is_resize_error());
    }
}
