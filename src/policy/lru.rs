//! # Least Recently Used (LRU) replacement policy
//!
//! Every read or write of a key moves it to the most-recently-used end; the
//! victim is always the entry that has gone longest without a reference.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   map: FxHashMap<K, SlotId>                                          │
//!   │   ┌─────────┬────────┐                                               │
//!   │   │  page_1 │  id_1  │──────────┐                                    │
//!   │   │  page_2 │  id_2  │──────────┼────────┐                           │
//!   │   │  page_3 │  id_3  │──────────┼────────┼────────┐                  │
//!   │   └─────────┴────────┘          ▼        ▼        ▼                  │
//!   │                                                                      │
//!   │   order: IntrusiveList<Entry<K, V>>                                  │
//!   │     head ──► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail                 │
//!   │     (LRU, next victim)                  (MRU, last referenced)       │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Flows
//!
//! ```text
//!   insert(new key), full:   pop_front (evict LRU) → push_back
//!   insert(existing key):    replace value → move_to_back
//!   get(key):                move_to_back → &value
//! ```
//!
//! ## Example
//!
//! ```
//! use cacheevict::policy::lru::LruCache;
//! use cacheevict::traits::CoreCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```
//!
//! ## Thread Safety
//!
//! `LruCache` is not thread-safe; use [`crate::builder::Cache`] for shared access.

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

/// Recency-ordered cache. See the module docs.
pub struct LruCache<K, V> {
    map: FxHashMap<K, SlotId>,
    /// head = LRU, tail = MRU
    order: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A zero capacity yields a cache that stores nothing.
    ///
    /// ```
    /// use cacheevict::policy::lru::LruCache;
    /// use cacheevict::traits::CoreCache;
    ///
    /// let cache: LruCache<String, i32> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
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

    /// Returns the least recently used entry without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    fn evict_lru(&mut self) {
        if let Some(entry) = self.order.pop_front() {
            self.map.remove(&entry.key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            trace!(capacity = self.capacity, "lru evicted least recently used entry");
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert_eq!(self.map.len(), self.order.len(), "map/list size mismatch");
        assert!(self.order.len() <= self.capacity, "list exceeds capacity");
        for (key, &id) in &self.map {
            let entry = self.order.get(id).expect("indexed slot missing from list");
            assert!(entry.key == *key, "index points at a different key");
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            self.order.move_to_back(id);
            return self
                .order
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.order.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.order.push_back(Entry {
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

        self.order.move_to_back(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.map.clear();
        self.order.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot::capture(&self.metrics, self.order.len(), self.capacity)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.order.len())
            .finish()
    }
}
