//! # Cache trait
//!
//! [`CoreCache`] is the single-threaded contract every eviction policy in
//! [`crate::policy`] implements. The thread-safe [`Cache`](crate::builder::Cache)
//! facade wraps one policy behind a lock and forwards to these methods.
//!
//! ```text
//!                 ┌─────────────────────────────────────────┐
//!                 │            CoreCache<K, V>              │
//!                 │                                         │
//!                 │  insert(&mut, K, V) → Option<V>         │
//!                 │  get(&mut, &K) → Option<&V>             │
//!                 │  contains(&, &K) → bool                 │
//!                 │  len(&) → usize                         │
//!                 │  is_empty(&) → bool                     │
//!                 │  capacity(&) → usize                    │
//!                 │  clear(&mut)                            │
//!                 └──────────────────┬──────────────────────┘
//!                                    │
//!        ┌──────────────┬────────────┴─┬──────────────┐
//!        ▼              ▼              ▼              ▼
//!   FifoCache       LruCache       LfuCache       ArcCache
//!   (no reorder     (move to MRU   (bump freq     (promote to T2,
//!    on read)        on read)       on read)       ghost hits adapt p)
//! ```
//!
//! `get` takes `&mut self` because reads are references: LRU, LFU and ARC
//! reorder on every hit. `contains` never touches ordering.
//!
//! ## Thread Safety
//!
//! Implementations are **not** thread-safe. Share them through
//! [`Cache`](crate::builder::Cache), which holds a single mutex per instance.

/// Core cache operations that all policies support.
///
/// # Example
///
/// ```
/// use cacheevict::policy::lru::LruCache;
/// use cacheevict::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the previous value if there was one.
    ///
    /// When inserting a new key into a full cache, the policy evicts first.
    ///
    /// ```
    /// use cacheevict::policy::fifo::FifoCache;
    /// use cacheevict::traits::CoreCache;
    ///
    /// let mut cache = FifoCache::new(10);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`, recording the access with the policy.
    ///
    /// ```
    /// use cacheevict::policy::lfu::LfuCache;
    /// use cacheevict::traits::CoreCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks for a live entry without affecting eviction order.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;

    /// Drops every entry and resets policy state.
    fn clear(&mut self);
}
