//! Element ids used to wire up ARIA relationships

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out unique component ids.
///
/// Owned by the application and shared with every select instance (e.g.
/// through a context), instead of living in a static. Clones share the same
/// counter.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: Arc<str>,
    counter: Arc<AtomicU64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("hc-select")
    }
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Arc::from(prefix.into()),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Next id, `"{prefix}-{n}"` with `n` starting at 1
    pub fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

impl PartialEq for IdGenerator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.counter, &other.counter)
    }
}

pub fn listbox_id(component_id: &str) -> String {
    format!("{}-listbox", component_id)
}

pub fn popup_id(component_id: &str) -> String {
    format!("{}-popup", component_id)
}

pub fn search_input_id(component_id: &str) -> String {
    format!("{}-search", component_id)
}

pub fn option_id(component_id: &str, index: usize) -> String {
    format!("{}-option-{}", component_id, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_from_one() {
        let ids = IdGenerator::new("picker");
        assert_eq!(ids.next_id(), "picker-1");
        assert_eq!(ids.next_id(), "picker-2");
    }

    #[test]
    fn test_clones_share_counter() {
        let ids = IdGenerator::default();
        let other = ids.clone();
        assert_eq!(ids.next_id(), "hc-select-1");
        assert_eq!(other.next_id(), "hc-select-2");
        assert_eq!(ids, other);
    }

    #[test]
    fn test_separate_generators_are_independent() {
        let a = IdGenerator::new("x");
        let b = IdGenerator::new("x");
        a.next_id();
        assert_eq!(b.next_id(), "x-1");
        assert_ne!(a, b);
    }

    #[test]
    fn test_derived_ids() {
        assert_eq!(listbox_id("s-1"), "s-1-listbox");
        assert_eq!(popup_id("s-1"), "s-1-popup");
        assert_eq!(search_input_id("s-1"), "s-1-search");
        assert_eq!(option_id("s-1", 3), "s-1-option-3");
    }
}
