//! Element identifier generation
//!
//! The engine is selector based, so every bound element needs an id. When
//! the markup has none, one is generated here and the caller writes it back
//! onto the element.

use std::sync::atomic::{AtomicU64, Ordering};

/// Namespace for generated ids
pub const DEFAULT_ID_PREFIX: &str = "stickit_";

/// Process-wide counter shared by every [`UniqueIds`]
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Source of fresh element ids
///
/// Implemented for closures so tests can inject a deterministic sequence.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Ids unique for the life of the process, safe to share across threads
#[derive(Debug, Clone)]
pub struct UniqueIds {
    prefix: String,
}

impl UniqueIds {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for UniqueIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UniqueIds {
    fn next_id(&self) -> String {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

/// Counter owned by one generator; restarts at 1 for each instance
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn unique_ids_are_prefixed_and_distinct() {
        let ids = UniqueIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(a.starts_with("stickit_"));
        assert_ne!(a, b);
    }

    #[test]
    fn unique_ids_shared_between_instances() {
        let a = UniqueIds::new().next_id();
        let b = UniqueIds::new().next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn unique_ids_across_threads() {
        let ids = Arc::new(UniqueIds::with_prefix("t_"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id generated");
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn sequential_ids_are_deterministic() {
        let ids = SequentialIds::new("el");
        assert_eq!(ids.next_id(), "el1");
        assert_eq!(ids.next_id(), "el2");
        assert_eq!(SequentialIds::new("el").next_id(), "el1");
    }

    #[test]
    fn closures_are_generators() {
        let fixed = || "fixed".to_string();
        assert_eq!(fixed.next_id(), "fixed");
    }
}
