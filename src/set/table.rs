//! Probing Table Module
//!
//! Main set engine: polynomial hashing, linear probing over tagged slots,
//! load-factor-triggered growth, and tombstone compaction.

use tracing::debug;

use crate::error::{MemKitError, Result};
use crate::set::{Slot, GROWTH_FACTOR, LOAD_FACTOR_THRESHOLD};

// == Compaction Strategy ==
/// Policy deciding when a delete triggers a full table rebuild.
///
/// Eager compaction trades delete latency for minimal probe chains;
/// batching by tombstone ratio amortizes the rebuild cost across deletes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CompactionStrategy {
    /// Rebuild after every successful delete
    #[default]
    Eager,
    /// Rebuild once tombstones / capacity reaches this ratio
    TombstoneRatio(f64),
}

// == Probing Set ==
/// String membership set using open addressing with linear probing.
///
/// Keys hash to a home index with the current capacity; collisions probe
/// forward by stride one, wrapping at the end of the array. Deleted keys
/// leave tombstones so probe chains through them stay reachable; `size`
/// counts only occupied slots.
#[derive(Debug)]
pub struct ProbingSet {
    /// Backing slot array; its length is the current capacity
    slots: Vec<Slot>,
    /// Number of occupied slots
    size: usize,
    /// Number of tombstone slots
    tombstones: usize,
    /// When deletes rebuild the table
    compaction: CompactionStrategy,
}

impl ProbingSet {
    // == Constructors ==
    /// Creates a new set with the given initial capacity and eager compaction.
    ///
    /// # Errors
    /// Returns `MemKitError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_compaction(capacity, CompactionStrategy::Eager)
    }

    /// Creates a new set with an explicit compaction strategy.
    ///
    /// # Errors
    /// Returns `MemKitError::InvalidCapacity` if `capacity` is zero.
    pub fn with_compaction(capacity: usize, compaction: CompactionStrategy) -> Result<Self> {
        if capacity == 0 {
            return Err(MemKitError::InvalidCapacity(capacity));
        }
        Ok(Self {
            slots: vec![Slot::Empty; capacity],
            size: 0,
            tombstones: 0,
            compaction,
        })
    }

    // == Insert ==
    /// Adds a key to the set; inserting a present key is a no-op.
    ///
    /// A new key first grows the table if placing it would push the load
    /// factor to the threshold, then occupies the first Empty slot on its
    /// probe path. If the table is saturated with occupied and tombstone
    /// slots, it grows and placement retries.
    pub fn insert(&mut self, key: &str) {
        if self.probe(key).is_some() {
            return;
        }

        if (self.size + 1) as f64 / self.capacity() as f64 >= LOAD_FACTOR_THRESHOLD {
            self.grow();
        }

        let mut pending = key.to_string();
        loop {
            match self.place(pending) {
                None => break,
                Some(unplaced) => {
                    pending = unplaced;
                    self.grow();
                }
            }
        }
        self.size += 1;
    }

    // == Contains ==
    /// Returns true if the key is a member of the set.
    ///
    /// Probing stops at the first Empty slot or after a full wraparound;
    /// tombstones are passed through.
    pub fn contains(&self, key: &str) -> bool {
        self.probe(key).is_some()
    }

    // == Delete ==
    /// Removes a key, returning true if it was present.
    ///
    /// The slot becomes a Tombstone, keeping later entries on the same
    /// probe chain reachable. Depending on the compaction strategy the
    /// table is then rebuilt at its current capacity, which clears every
    /// tombstone. Absent keys are a no-op.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.probe(key) {
            Some(index) => {
                self.slots[index] = Slot::Tombstone;
                self.size -= 1;
                self.tombstones += 1;
                if self.should_compact() {
                    self.compact();
                }
                true
            }
            None => false,
        }
    }

    // == Snapshot ==
    /// Returns a `(index, slot)` snapshot of the full backing array.
    pub fn snapshot(&self) -> Vec<(usize, Slot)> {
        self.slots.iter().cloned().enumerate().collect()
    }

    // == Iteration ==
    /// Iterates the live keys in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(key) => Some(key.as_str()),
            _ => None,
        })
    }

    // == Accessors ==
    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current capacity of the backing array.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor (occupied slots over capacity).
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns the number of tombstone slots currently in the array.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    // == Internal: Hashing ==
    /// Polynomial rolling hash: base-31 accumulation over character codes,
    /// reduced modulo the current capacity at every step.
    ///
    /// Home indices are only valid for the capacity they were computed
    /// with; every rebuild rehashes all live keys.
    fn home_index(&self, key: &str) -> usize {
        let modulus = self.capacity() as i64;
        let mut acc: i64 = 0;
        for ch in key.chars() {
            acc = (acc * 31 + i64::from(u32::from(ch))) % modulus;
        }
        acc.unsigned_abs() as usize
    }

    // == Internal: Probing ==
    /// Finds the Occupied slot holding `key`, probing forward from its
    /// home index through non-matching and tombstone slots.
    ///
    /// Returns None at the first Empty slot or after a full wraparound.
    fn probe(&self, key: &str) -> Option<usize> {
        let home = self.home_index(key);
        for step in 0..self.capacity() {
            let index = (home + step) % self.capacity();
            match &self.slots[index] {
                Slot::Empty => return None,
                slot if slot.holds(key) => return Some(index),
                _ => {}
            }
        }
        None
    }

    /// Places a key into the first Empty slot on its probe path.
    ///
    /// Returns the key back if no Empty slot exists in a full wraparound.
    /// Tombstones are probed through, never overwritten.
    fn place(&mut self, key: String) -> Option<String> {
        let home = self.home_index(&key);
        for step in 0..self.capacity() {
            let index = (home + step) % self.capacity();
            if self.slots[index].is_empty() {
                self.slots[index] = Slot::Occupied(key);
                return None;
            }
        }
        Some(key)
    }

    // == Internal: Rebuild ==
    /// Reinserts every live key into a fresh table of the given capacity.
    ///
    /// Growth and compaction both reduce to this; reinsertion order does
    /// not affect membership.
    fn rebuild(&mut self, capacity: usize) {
        let old = std::mem::replace(&mut self.slots, vec![Slot::Empty; capacity]);
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied(key) = slot {
                // Live keys never fill the fresh table, so placement succeeds
                let unplaced = self.place(key);
                debug_assert!(unplaced.is_none());
            }
        }
    }

    /// Doubles the capacity and rehashes every live key.
    fn grow(&mut self) {
        let capacity = self.capacity() * GROWTH_FACTOR;
        debug!(
            "growing table from {} to {} slots ({} live keys)",
            self.capacity(),
            capacity,
            self.size
        );
        self.rebuild(capacity);
    }

    /// Rebuilds at the current capacity, clearing every tombstone.
    fn compact(&mut self) {
        debug!(
            "compacting table at {} slots ({} tombstones cleared)",
            self.capacity(),
            self.tombstones
        );
        self.rebuild(self.capacity());
    }

    fn should_compact(&self) -> bool {
        match self.compaction {
            CompactionStrategy::Eager => true,
            CompactionStrategy::TombstoneRatio(ratio) => {
                self.tombstones as f64 / self.capacity() as f64 >= ratio
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    /// Strategy that keeps tombstones around for the whole test.
    fn never_compact(capacity: usize) -> ProbingSet {
        ProbingSet::with_compaction(capacity, CompactionStrategy::TombstoneRatio(2.0)).unwrap()
    }

    #[test]
    fn test_set_new() {
        let set = ProbingSet::new(4).unwrap();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 4);
        assert_eq!(set.load_factor(), 0.0);
    }

    #[test]
    fn test_set_rejects_zero_capacity() {
        assert!(matches!(
            ProbingSet::new(0),
            Err(MemKitError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_set_insert_and_contains() {
        let mut set = ProbingSet::new(8).unwrap();

        set.insert("alpha");
        set.insert("beta");

        assert!(set.contains("alpha"));
        assert!(set.contains("beta"));
        assert!(!set.contains("gamma"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_duplicate_insert_is_noop() {
        let mut set = ProbingSet::new(8).unwrap();

        set.insert("alpha");
        set.insert("alpha");
        set.insert("alpha");

        assert_eq!(set.len(), 1);
        assert_eq!(set.capacity(), 8);
    }

    #[test]
    fn test_set_delete() {
        let mut set = ProbingSet::new(8).unwrap();

        set.insert("alpha");
        set.insert("beta");

        assert!(set.delete("alpha"));
        assert!(!set.contains("alpha"));
        assert!(set.contains("beta"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_delete_absent_is_noop() {
        let mut set = ProbingSet::new(8).unwrap();

        set.insert("alpha");

        assert!(!set.delete("gamma"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_growth_scenario() {
        // Capacity 4 with threshold 0.75: the 3rd distinct insertion grows
        // the table to 8 before it is placed
        let mut set = ProbingSet::new(4).unwrap();

        set.insert("one");
        set.insert("two");
        assert_eq!(set.capacity(), 4);

        set.insert("three");
        assert_eq!(set.capacity(), 8);
        assert_eq!(set.len(), 3);

        assert!(set.contains("one"));
        assert!(set.contains("two"));
        assert!(set.contains("three"));
    }

    #[test]
    fn test_set_load_factor_bounded_after_insert() {
        let mut set = ProbingSet::new(4).unwrap();

        for i in 0..64 {
            set.insert(&format!("key-{}", i));
            assert!(
                set.load_factor() < LOAD_FACTOR_THRESHOLD,
                "load factor {} at or above threshold after insert",
                set.load_factor()
            );
        }
        assert_eq!(set.len(), 64);
    }

    #[test]
    fn test_set_eager_compaction_clears_tombstones() {
        let mut set = ProbingSet::new(8).unwrap();

        // "a" (97) and "i" (105) share home index 1 at capacity 8
        set.insert("a");
        set.insert("i");
        set.delete("a");

        assert_eq!(set.tombstones(), 0);
        // Compaction rehomed the surviving key to its minimal position
        assert_eq!(set.snapshot()[1].1, Slot::Occupied("i".to_string()));
        assert!(set.contains("i"));
    }

    #[test]
    fn test_set_tombstone_is_probe_transparent() {
        let mut set = never_compact(8);

        // Collision chain: "i" sits one past its home because "a" is there
        set.insert("a");
        set.insert("i");
        set.delete("a");

        assert_eq!(set.tombstones(), 1);
        assert!(!set.contains("a"));
        // The tombstone must not hide the key behind it
        assert!(set.contains("i"));
    }

    #[test]
    fn test_set_tombstones_do_not_count_toward_size() {
        let mut set = never_compact(8);

        set.insert("a");
        set.insert("b");
        set.delete("a");

        assert_eq!(set.len(), 1);
        assert_eq!(set.tombstones(), 1);
        assert_eq!(set.load_factor(), 1.0 / 8.0);
    }

    #[test]
    fn test_set_tombstone_ratio_triggers_compaction() {
        let mut set =
            ProbingSet::with_compaction(8, CompactionStrategy::TombstoneRatio(0.25)).unwrap();

        set.insert("a");
        set.insert("b");
        set.insert("c");
        set.insert("d");

        set.delete("a");
        // 1/8 below the ratio: tombstone stays
        assert_eq!(set.tombstones(), 1);

        set.delete("b");
        // 2/8 reaches the ratio: table rebuilt
        assert_eq!(set.tombstones(), 0);
        assert!(set.contains("c"));
        assert!(set.contains("d"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_saturated_insert_grows_and_retries() {
        // Fill capacity 8 with 4 occupied and 4 tombstone slots, leaving
        // no Empty slot while the load factor stays under the threshold
        let mut set = never_compact(8);

        for key in ["k1", "k2", "k3", "k4", "k5"] {
            set.insert(key);
        }
        for key in ["k1", "k2", "k3", "k4"] {
            set.delete(key);
        }
        for key in ["k6", "k7", "k8"] {
            set.insert(key);
        }
        assert_eq!(set.capacity(), 8);
        assert_eq!(set.tombstones(), 4);
        assert_eq!(set.len(), 4);

        // No Empty slot remains: placement must grow and retry
        set.insert("k9");

        assert_eq!(set.capacity(), 16);
        assert_eq!(set.len(), 5);
        for key in ["k5", "k6", "k7", "k8", "k9"] {
            assert!(set.contains(key), "{} lost across growth", key);
        }
        for key in ["k1", "k2", "k3", "k4"] {
            assert!(!set.contains(key), "{} resurrected by growth", key);
        }
    }

    #[test]
    fn test_set_contains_terminates_without_empty_slots() {
        let mut set = never_compact(8);

        for key in ["k1", "k2", "k3", "k4", "k5"] {
            set.insert(key);
        }
        for key in ["k1", "k2", "k3", "k4"] {
            set.delete(key);
        }
        for key in ["k6", "k7", "k8"] {
            set.insert(key);
        }

        // Full wraparound over occupied and tombstone slots only
        assert!(!set.contains("absent"));
    }

    #[test]
    fn test_set_empty_string_key() {
        let mut set = ProbingSet::new(4).unwrap();

        set.insert("");
        assert!(set.contains(""));
        assert_eq!(set.len(), 1);

        set.delete("");
        assert!(!set.contains(""));
    }

    #[test]
    fn test_set_iter_yields_live_keys() {
        let mut set = ProbingSet::new(8).unwrap();

        set.insert("alpha");
        set.insert("beta");
        set.delete("alpha");

        let keys: Vec<&str> = set.iter().collect();
        assert_eq!(keys, vec!["beta"]);
    }

    #[test]
    fn test_set_snapshot_covers_full_array() {
        let mut set = ProbingSet::new(4).unwrap();
        set.insert("alpha");

        let snapshot = set.snapshot();
        assert_eq!(snapshot.len(), 4);
        assert_eq!(
            snapshot
                .iter()
                .filter(|(_, slot)| matches!(slot, Slot::Occupied(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_set_capacity_one_grows_on_first_insert() {
        let mut set = ProbingSet::new(1).unwrap();

        set.insert("only");

        assert!(set.contains("only"));
        assert!(set.capacity() > 1);
        assert!(set.load_factor() < LOAD_FACTOR_THRESHOLD);
    }
}
