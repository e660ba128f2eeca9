//! Cache Entry Module
//!
//! Defines the arena entry for the recency list.

// == Cache Entry ==
/// A single cache entry stored in the recency arena.
///
/// `prev` and `next` are handles (arena indices) into the same arena,
/// forming a doubly linked list ordered by recency. `None` marks a list
/// end or a detached entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached key
    pub key: i64,
    /// The stored value
    pub value: i64,
    /// Handle of the next-more-recent entry
    pub prev: Option<usize>,
    /// Handle of the next-less-recent entry
    pub next: Option<usize>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new detached entry holding `key` and `value`.
    pub fn new(key: i64, value: i64) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }
}
