//! First-In, First-Out (FIFO) replacement policy.
//!
//! Entries are evicted strictly in insertion order. Neither reads nor updates
//! of an existing key move it: once a key has its place in the queue it keeps
//! it until it becomes the oldest and is evicted.
//!
//! ## Architecture
//!
//! ```text
//!   map: FxHashMap<K, SlotId>          queue: IntrusiveList<Entry<K, V>>
//!   ┌─────────┬─────────┐
//!   │  key C  │  id_3   │              head ─► [C] ◄──► [B] ◄──► [A] ◄── tail
//!   │  key B  │  id_2   │                    newest              oldest
//!   │  key A  │  id_1   │                                        (victim)
//!   └─────────┴─────────┘
//! ```
//!
//! | Operation  | Time | Notes                                  |
//! |------------|------|----------------------------------------|
//! | `insert`   | O(1) | New key at head; evicts tail when full |
//! | `get`      | O(1) | Never reorders                         |
//! | `contains` | O(1) |                                        |
//!
//! ## Example
//!
//! ```
//! use cacheevict::policy::fifo::FifoCache;
//! use cacheevict::traits::CoreCache;
//!
//! let mut cache = FifoCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a"); // does not protect "a"
//! cache.insert("c", 3);
//!
//! assert!(!cache.contains(&"a"));
//! assert!(cache.contains(&"b"));
//! assert!(cache.contains(&"c"));
//! ```

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

/// Insertion-ordered cache. See the module docs.
pub struct FifoCache<K, V> {
    map: FxHashMap<K, SlotId>,
    /// head = newest, tail = oldest
    queue: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A zero capacity yields a cache that stores nothing; use
    /// [`try_new`](Self::try_new) to reject it instead.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            queue: IntrusiveList::with_capacity(capacity),
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

    /// Returns the entry that will be evicted next.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.queue.back().map(|entry| (&entry.key, &entry.value))
    }

    fn evict_oldest(&mut self) {
        if let Some(entry) = self.queue.pop_back() {
            self.map.remove(&entry.key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            trace!(capacity = self.capacity, "fifo evicted oldest entry");
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.queue.debug_validate_invariants();
        assert_eq!(self.map.len(), self.queue.len(), "map/queue size mismatch");
        assert!(self.queue.len() <= self.capacity, "queue exceeds capacity");
        for (key, &id) in &self.map {
            let entry = self.queue.get(id).expect("indexed slot missing from queue");
            assert!(entry.key == *key, "index points at a different key");
        }
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            // position is fixed at first insert
            return self
                .queue
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.queue.len() >= self.capacity {
            self.evict_oldest();
        }

        let id = self.queue.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.queue.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.map.clear();
        self.queue.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot::capture(&self.metrics, self.queue.len(), self.capacity)
    }
}

impl<K, V> fmt::Debug for FifoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_new_cache() {
        let cache: FifoCache<String, i32> = FifoCache::new(10);
        assert_eq!(cache.capacity(), 10);
        assert!(cache.is_empty());
        assert!(cache.peek_oldest().is_none());
    }

    #[test]
    fn fifo_try_new_rejects_zero() {
        assert_eq!(
            FifoCache::<u32, u32>::try_new(0).unwrap_err(),
            ConfigError::ZeroCapacity
        );
        assert!(FifoCache::<u32, u32>::try_new(1).is_ok());
    }

    #[test]
    fn fifo_evicts_first_inserted() {
        let mut cache = FifoCache::new(3);
        for i in 0..4 {
            cache.insert(i, i * 10);
            cache.debug_validate_invariants();
        }
        assert!(!cache.contains(&0));
        for i in 1..4 {
            assert_eq!(cache.get(&i), Some(&(i * 10)));
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn fifo_get_does_not_reorder() {
        let mut cache = FifoCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        for _ in 0..5 {
            assert_eq!(cache.get(&"a"), Some(&1));
        }
        cache.insert("c", 3);
        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn fifo_update_keeps_position() {
        let mut cache = FifoCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.insert("a", 10), Some(1));
        assert_eq!(cache.peek_oldest(), Some((&"a", &10)));

        cache.insert("c", 3);
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.get(&"b"), Some(&2));
        cache.debug_validate_invariants();
    }

    #[test]
    fn fifo_zero_capacity_stores_nothing() {
        let mut cache = FifoCache::new(0);
        assert_eq!(cache.insert("a", 1), None);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn fifo_clear() {
        let mut cache = FifoCache::new(4);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&1));
        cache.insert(3, "three");
        assert_eq!(cache.peek_oldest(), Some((&3, &"three")));
        cache.debug_validate_invariants();
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn fifo_metrics_count_hits_and_evictions() {
        let mut cache = FifoCache::new(1);
        cache.insert(1, 1);
        cache.get(&1);
        cache.get(&2);
        cache.insert(1, 2);
        cache.insert(2, 2);

        let snap = cache.snapshot();
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 1);
        assert_eq!(snap.insert_new, 2);
        assert_eq!(snap.insert_updates, 1);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!(snap.cache_len, 1);
    }
}
