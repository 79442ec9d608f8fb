//! Identity tag allocation
//!
//! Every shape and group is addressed on the drawing surface by a unique
//! identity tag. Tags are handed out by an `IdAllocator` injected through
//! the `ShapeContext`, never reused.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Hands out identity tags
pub trait IdAllocator: fmt::Debug {
    /// A fresh tag for an instance of `kind`
    fn next_id(&self, kind: &str) -> String;
}

/// Counter-based tags: `Rectangle1`, `Triangle2`, `Group3`, ...
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&self, kind: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", kind, n)
    }
}

/// Counter shared by every context in the process
static PROCESS_IDS: SequentialIds = SequentialIds::new();

/// Sequential tags drawn from one process-wide counter.
///
/// Contexts that share a surface must not hand out the same tag twice, so
/// this is what `ShapeContext::new` uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessIds;

impl IdAllocator for ProcessIds {
    fn next_id(&self, kind: &str) -> String {
        PROCESS_IDS.next_id(kind)
    }
}

/// Random tags: `Rectangle-67e55044-10b1-426f-9247-bb680e5fe0c8`
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdAllocator for UuidIds {
    fn next_id(&self, kind: &str) -> String {
        format!("{}-{}", kind, Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id("Rectangle"), "Rectangle1");
        assert_eq!(ids.next_id("Triangle"), "Triangle2");
        assert_eq!(ids.next_id("Group"), "Group3");
    }

    #[test]
    fn test_process_ids_never_repeat() {
        let tags: HashSet<String> = (0..100).map(|_| ProcessIds.next_id("Kite")).collect();
        assert_eq!(tags.len(), 100);
    }

    #[test]
    fn test_uuid_ids() {
        let a = UuidIds.next_id("Circle");
        let b = UuidIds.next_id("Circle");
        assert!(a.starts_with("Circle-"));
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a["Circle-".len()..]).is_ok());
    }
}
