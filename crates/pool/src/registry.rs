//! Diagnostics registry for pools that opt into reporting

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

/// A pool that can describe its own utilization
pub trait PoolStat {
    /// Label shown in reports
    fn label(&self) -> String;

    /// Human-readable status, e.g. `total=4 active=1 inactive=3`
    fn status(&self) -> String;
}

/// Append-only list of pools that render into a utilization report
///
/// Entries are held for the registry's lifetime and never deduplicated.
/// Construct one per process (or per test) and pass it to the pools that
/// should report.
#[derive(Default)]
pub struct PoolRegistry {
    entries: RefCell<Vec<Rc<dyn PoolStat>>>,
}

impl PoolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pool to the report
    pub fn register(&self, pool: Rc<dyn PoolStat>) {
        self.entries.borrow_mut().push(pool);
    }

    /// Number of registered pools
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if no pool has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Render `"<label>: <status>"` for every pool, in registration order
    pub fn report(&self) -> String {
        self.entries
            .borrow()
            .iter()
            .map(|pool| format!("{}: {}", pool.label(), pool.status()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    struct Fake {
        label: &'static str,
        hits: Cell<u32>,
    }

    impl PoolStat for Fake {
        fn label(&self) -> String {
            self.label.to_string()
        }

        fn status(&self) -> String {
            format!("hits={}", self.hits.get())
        }
    }

    #[test]
    fn test_report_in_registration_order() {
        let registry = PoolRegistry::new();
        let a = Rc::new(Fake { label: "a", hits: Cell::new(0) });
        let b = Rc::new(Fake { label: "b", hits: Cell::new(2) });

        registry.register(b);
        registry.register(a.clone());
        a.hits.set(5);

        assert_eq!(registry.report(), "b: hits=2\na: hits=5");
    }

    #[test]
    fn test_no_deduplication() {
        let registry = PoolRegistry::new();
        let a = Rc::new(Fake { label: "a", hits: Cell::new(1) });

        registry.register(a.clone());
        registry.register(a);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.report(), "a: hits=1\na: hits=1");
    }

    #[test]
    fn test_empty_report() {
        let registry = PoolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.report(), "");
    }
}
