//! Capacity policy: how much an exhausted pool grows

use crate::settings::{ExpandMethod, PoolSettings};

/// Decide how many instances to add when `spawn` finds the pool empty.
///
/// Returns `None` when the expand method forbids growth. The result is
/// clamped to `max(1, max_size)` so a doubling pool never pre-allocates
/// past its cap, yet can always satisfy the spawn that triggered it.
pub fn growth(total: usize, settings: &PoolSettings) -> Option<usize> {
    let wanted = match settings.expand_method {
        ExpandMethod::Disabled => return None,
        ExpandMethod::OneAtATime => 1,
        ExpandMethod::Double => total.max(1),
    };
    Some(wanted.min(settings.max_size.max(1)))
}
