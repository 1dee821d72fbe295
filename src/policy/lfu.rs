//! # LFU (Least Frequently Used) replacement policy
//!
//! Evicts the entry with the lowest reference count. Entries sharing a count
//! live in the same bucket, ordered by recency, so ties go to the entry that
//! reached that count first.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, Position { freq, SlotId }>
//!
//!   buckets: FxHashMap<u64, IntrusiveList<Entry<K, V>>>
//!
//!     freq 1 │ head ─► [E] ◄──► [D] ◄── tail   ◄── min_freq, victim = D
//!     freq 3 │ head ─► [B] ◄── tail
//!     freq 7 │ head ─► [A] ◄──► [C] ◄── tail
//! ```
//!
//! ## Flows
//!
//! ```text
//!   get / insert(existing):
//!     1. unlink from bucket[f]
//!     2. bucket[f] empty → drop it; if f == min_freq → min_freq = f + 1
//!     3. push at head of bucket[f + 1]
//!
//!   insert(new), full:
//!     1. pop tail of bucket[min_freq] (oldest of the least used)
//!     2. push at head of bucket[1], min_freq = 1
//! ```
//!
//! | Operation  | Time |
//! |------------|------|
//! | `insert`   | O(1) |
//! | `get`      | O(1) |
//! | `contains` | O(1) |
//!
//! ## Example
//!
//! ```
//! use cacheevict::policy::lfu::LfuCache;
//! use cacheevict::traits::CoreCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.get(&"a");
//! cache.insert("c", 3);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.frequency(&"a"), Some(3));
//! ```
//!
//! ## Implementation Notes
//!
//! - Frequencies saturate at `u64::MAX`
//! - Empty buckets are removed eagerly, so `min_freq` always names a
//!   non-empty bucket while the cache is non-empty

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::CoreCache;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    freq: u64,
    id: SlotId,
}

/// Frequency-bucketed cache. See the module docs.
pub struct LfuCache<K, V> {
    index: FxHashMap<K, Position>,
    /// head = most recently bumped, tail = oldest in bucket
    buckets: FxHashMap<u64, IntrusiveList<Entry<K, V>>>,
    min_freq: u64,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A zero capacity yields a cache that stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            min_freq: 0,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Like [`new`](Self::new), but fails on zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self::new(capacity))
    }

    /// Returns the reference count of `key` without changing it.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|pos| pos.freq)
    }

    /// Returns the entry that will be evicted next.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.buckets
            .get(&self.min_freq)
            .and_then(|bucket| bucket.back())
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Moves `key` one bucket up and returns its new position.
    fn bump(&mut self, key: &K) -> Option<Position> {
        let old = *self.index.get(key)?;
        let bucket = self.buckets.get_mut(&old.freq)?;
        let entry = bucket.remove(old.id)?;
        let freq = old.freq.saturating_add(1);

        if bucket.is_empty() {
            self.buckets.remove(&old.freq);
            if self.min_freq == old.freq {
                self.min_freq = freq;
            }
        }

        let id = self.buckets.entry(freq).or_default().push_front(entry);
        let new = Position { freq, id };
        if let Some(pos) = self.index.get_mut(key) {
            *pos = new;
        }
        Some(new)
    }

    fn evict_lfu(&mut self) {
        let min_freq = self.min_freq;
        let Some(bucket) = self.buckets.get_mut(&min_freq) else {
            return;
        };
        let Some(entry) = bucket.pop_back() else {
            return;
        };
        if bucket.is_empty() {
            self.buckets.remove(&min_freq);
        }
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        trace!(freq = min_freq, "lfu evicted least frequently used entry");
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let total: usize = self.buckets.values().map(IntrusiveList::len).sum();
        assert_eq!(total, self.index.len(), "bucket sizes don't sum to index size");
        assert!(self.index.len() <= self.capacity, "entries exceed capacity");

        for (freq, bucket) in &self.buckets {
            assert!(!bucket.is_empty(), "empty bucket {freq} left behind");
            bucket.debug_validate_invariants();
        }

        for (key, pos) in &self.index {
            let entry = self
                .buckets
                .get(&pos.freq)
                .and_then(|bucket| bucket.get(pos.id))
                .expect("indexed entry missing from its frequency bucket");
            assert!(entry.key == *key, "index points at a different key");
        }

        if !self.index.is_empty() {
            let lowest = self.buckets.keys().min().copied();
            assert_eq!(lowest, Some(self.min_freq), "min_freq is stale");
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(pos) = self.bump(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return self
                .buckets
                .get_mut(&pos.freq)
                .and_then(|bucket| bucket.get_mut(pos.id))
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            self.evict_lfu();
        }

        let id = self.buckets.entry(1).or_default().push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, Position { freq: 1, id });
        self.min_freq = 1;
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(pos) = self.bump(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.buckets
            .get(&pos.freq)
            .and_then(|bucket| bucket.get(pos.id))
            .map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot::capture(&self.metrics, self.index.len(), self.capacity)
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity)
            .field("len", &self.index.len())
            .field("buckets", &self.buckets.len())
            .field("min_freq", &self.min_freq)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lfu_new_entries_start_at_one() {
        let mut cache = LfuCache::new(4);
        cache.insert("a", 1);
        assert_eq!(cache.frequency(&"a"), Some(1));
        assert_eq!(cache.frequency(&"missing"), None);
        cache.debug_validate_invariants();
    }

    #[test]
    fn lfu_get_and_update_bump_frequency() {
        let mut cache = LfuCache::new(4);
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.frequency(&"a"), Some(2));

        assert_eq!(cache.insert("a", 10), Some(1));
        assert_eq!(cache.frequency(&"a"), Some(3));
        assert_eq!(cache.get(&"a"), Some(&10));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lfu_evicts_lowest_frequency() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");
        cache.get(&"a");
        cache.insert("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.frequency(&"c"), Some(1));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lfu_ties_evict_oldest_in_bucket() {
        let mut cache = LfuCache::new(3);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(3, "three");
        assert_eq!(cache.peek_lfu(), Some((&1, &"one")));

        cache.insert(4, "four");
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lfu_tie_break_follows_bump_order() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        // a reaches freq 2 before b does, so a is older within bucket 2
        cache.get(&"a");
        cache.get(&"b");
        cache.get(&"c");
        assert_eq!(cache.peek_lfu(), Some((&"a", &1)));

        cache.insert("d", 4);
        assert!(!cache.contains(&"a"));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lfu_min_freq_advances_when_bucket_empties() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.get(&"a");
        cache.get(&"b");
        // bucket 1 is gone, min_freq must have moved to 2
        cache.debug_validate_invariants();
        cache.get(&"a");
        cache.insert("c", 3);
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"a"));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lfu_zero_capacity() {
        let mut cache = LfuCache::new(0);
        cache.insert("a", 1);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
        assert!(LfuCache::<u8, u8>::try_new(0).is_err());
    }

    #[test]
    fn lfu_clear_resets_frequencies() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", 1);
        cache.get(&"a");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.peek_lfu(), None);
        cache.insert("a", 2);
        assert_eq!(cache.frequency(&"a"), Some(1));
        cache.debug_validate_invariants();
    }
}
