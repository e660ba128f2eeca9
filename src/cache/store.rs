//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the recency list for
//! O(1) expected get/put/delete and strict LRU eviction.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheStats, RecencyList};
use crate::error::{MemKitError, Result};

// == LRU Cache ==
/// Fixed-capacity cache of integer keys and values with LRU eviction.
///
/// Every key in the index maps to exactly one live handle in the recency
/// list, and vice versa. The list front is the most recently used entry,
/// the back is the least recently used; the entry count never exceeds the
/// capacity fixed at construction.
#[derive(Debug)]
pub struct LruCache {
    /// Key to recency-list handle index
    index: HashMap<i64, usize>,
    /// Recency order over the cached entries
    list: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl LruCache {
    // == Constructor ==
    /// Creates a new LruCache with the given fixed capacity.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    ///
    /// # Errors
    /// Returns `MemKitError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MemKitError::InvalidCapacity(capacity));
        }
        Ok(Self {
            index: HashMap::with_capacity(capacity),
            list: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves the value for a key, promoting the entry to MRU on a hit.
    ///
    /// Returns None if the key is absent. A miss records a statistic but
    /// never changes ordering or size.
    pub fn get(&mut self, key: i64) -> Option<i64> {
        match self.index.get(&key).copied() {
            Some(handle) => {
                self.list.move_to_front(handle);
                self.stats.record_hit();
                self.list.value(handle)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// If the key exists, its value is overwritten and the entry is
    /// promoted to MRU; size is unchanged. Otherwise the entry is inserted
    /// at MRU, evicting the current LRU entry first when at capacity.
    pub fn put(&mut self, key: i64, value: i64) {
        if let Some(&handle) = self.index.get(&key) {
            self.list.set_value(handle, value);
            self.list.move_to_front(handle);
            return;
        }

        // At capacity: evict exactly one entry, the current LRU
        if self.index.len() == self.capacity {
            if let Some((evicted_key, _)) = self.list.pop_back() {
                self.index.remove(&evicted_key);
                self.stats.record_eviction();
                debug!("evicted least recently used key {}", evicted_key);
            }
        }

        let handle = self.list.push_front(key, value);
        self.index.insert(key, handle);
    }

    // == Delete ==
    /// Removes an entry by key, returning its value.
    ///
    /// No-op returning None if the key is absent.
    pub fn delete(&mut self, key: i64) -> Option<i64> {
        let handle = self.index.remove(&key)?;
        self.list.remove(handle).map(|(_, value)| value)
    }

    // == Snapshot ==
    /// Returns an ordered `(key, value)` snapshot from MRU to LRU.
    pub fn snapshot(&self) -> Vec<(i64, i64)> {
        self.list.iter().collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
