//! Thread-safe cache facade and its builder.
//!
//! [`Cache`] owns exactly one eviction policy behind a `parking_lot::Mutex`.
//! Every facade method takes `&self`, locks for the duration of the call and
//! releases on return, so a `Cache` can be shared across threads through
//! `std::sync::Arc` without further wrapping.
//!
//! ```text
//!   CacheBuilder ──► CacheConfig::validate ──► Cache<K, V>
//!                                               │
//!                                               ▼
//!                                  Mutex<CacheInner<K, V>>
//!                                  ┌──────┬──────┬──────┬──────┐
//!                                  │ Fifo │ Lru  │ Lfu  │ Arc  │
//!                                  └──────┴──────┴──────┴──────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cacheevict::builder::CacheBuilder;
//! use cacheevict::config::CachePolicy;
//!
//! let cache = CacheBuilder::new()
//!     .policy(CachePolicy::Lru)
//!     .capacity(100)
//!     .build::<u64, String>()
//!     .unwrap();
//! cache.add(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::{CacheConfig, CachePolicy};
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetricsSnapshot, MetricsSnapshotProvider};
use crate::policy::arc::ArcCache;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::CoreCache;

enum CacheInner<K, V> {
    Fifo(FifoCache<K, V>),
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Arc(ArcCache<K, V>),
}

impl<K, V> CacheInner<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(policy: CachePolicy, capacity: usize) -> Self {
        match policy {
            CachePolicy::Fifo => CacheInner::Fifo(FifoCache::new(capacity)),
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(capacity)),
            CachePolicy::Arc => CacheInner::Arc(ArcCache::new(capacity)),
        }
    }

    fn as_core(&self) -> &dyn CoreCache<K, V> {
        match self {
            CacheInner::Fifo(fifo) => fifo,
            CacheInner::Lru(lru) => lru,
            CacheInner::Lfu(lfu) => lfu,
            CacheInner::Arc(arc) => arc,
        }
    }

    fn as_core_mut(&mut self) -> &mut dyn CoreCache<K, V> {
        match self {
            CacheInner::Fifo(fifo) => fifo,
            CacheInner::Lru(lru) => lru,
            CacheInner::Lfu(lfu) => lfu,
            CacheInner::Arc(arc) => arc,
        }
    }
}

/// A fixed-capacity cache with one eviction policy, safe to share between
/// threads.
///
/// All operations serialize on a single per-instance lock. Values are cloned
/// out of the cache on [`get`](Self::get) so no reference outlives the lock.
pub struct Cache<K, V> {
    policy: CachePolicy,
    inner: Mutex<CacheInner<K, V>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Builds a cache for `policy` holding at most `capacity` entries.
    ///
    /// ```
    /// use cacheevict::builder::Cache;
    /// use cacheevict::config::CachePolicy;
    /// use cacheevict::error::ConfigError;
    ///
    /// let cache = Cache::<u32, u32>::new(CachePolicy::Fifo, 2).unwrap();
    /// assert_eq!(cache.capacity(), 2);
    ///
    /// let err = Cache::<u32, u32>::new(CachePolicy::Fifo, 0).unwrap_err();
    /// assert_eq!(err, ConfigError::ZeroCapacity);
    /// ```
    pub fn new(policy: CachePolicy, capacity: usize) -> Result<Self, ConfigError> {
        Self::from_config(CacheConfig::new(policy, capacity))
    }

    /// Builds a cache from a policy name such as `"lru"` or `"ARC"`.
    ///
    /// ```
    /// use cacheevict::builder::Cache;
    /// use cacheevict::error::ConfigError;
    ///
    /// assert!(Cache::<u32, u32>::from_name("lfu", 8).is_ok());
    /// assert_eq!(
    ///     Cache::<u32, u32>::from_name("mru", 8).unwrap_err(),
    ///     ConfigError::UnknownPolicy("mru".into())
    /// );
    /// ```
    pub fn from_name(name: &str, capacity: usize) -> Result<Self, ConfigError> {
        let policy = name.parse::<CachePolicy>().inspect_err(|err| {
            debug!(%err, capacity, "rejected cache configuration");
        })?;
        Self::new(policy, capacity)
    }

    /// Validates `config` and builds the cache it describes.
    pub fn from_config(config: CacheConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            debug!(%err, policy = %config.policy, capacity = config.capacity, "rejected cache configuration");
            return Err(err);
        }
        debug!(policy = %config.policy, capacity = config.capacity, "built cache");
        Ok(Self {
            policy: config.policy,
            inner: Mutex::new(CacheInner::new(config.policy, config.capacity)),
        })
    }

    /// Inserts or updates `key`. Never fails; may evict another entry.
    pub fn add(&self, key: K, value: V) {
        self.inner.lock().as_core_mut().insert(key, value);
    }

    /// Returns a clone of the value for `key`, recording the access with the
    /// policy. `None` means not found.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().as_core_mut().get(key).cloned()
    }

    /// Checks for a live entry without affecting eviction order.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().as_core().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().as_core().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().as_core().capacity()
    }

    /// The eviction policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Drops every entry and resets policy state.
    pub fn clear(&self) {
        self.inner.lock().as_core_mut().clear();
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        match &*self.inner.lock() {
            CacheInner::Fifo(fifo) => fifo.snapshot(),
            CacheInner::Lru(lru) => lru.snapshot(),
            CacheInner::Lfu(lfu) => lfu.snapshot(),
            CacheInner::Arc(arc) => arc.snapshot(),
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Checks the wrapped policy's internal invariants.
    ///
    /// Panics if any invariant is violated.
    pub fn debug_validate_invariants(&self) {
        match &*self.inner.lock() {
            CacheInner::Fifo(fifo) => fifo.debug_validate_invariants(),
            CacheInner::Lru(lru) => lru.debug_validate_invariants(),
            CacheInner::Lfu(lfu) => lfu.debug_validate_invariants(),
            CacheInner::Arc(arc) => arc.debug_validate_invariants(),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        let core = inner.as_core();
        f.debug_struct("Cache")
            .field("policy", &self.policy)
            .field("capacity", &core.capacity())
            .field("len", &core.len())
            .finish()
    }
}

/// Fluent builder for [`Cache`].
///
/// A policy must be chosen explicitly; capacity defaults to 0, which
/// [`build`](Self::build) rejects.
#[derive(Debug, Clone, Default)]
pub struct CacheBuilder {
    policy: Option<CachePolicy>,
    capacity: usize,
}

impl CacheBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingPolicy`] if no policy was set.
    /// - [`ConfigError::ZeroCapacity`] if capacity is 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cacheevict::builder::CacheBuilder;
    /// use cacheevict::config::CachePolicy;
    /// use cacheevict::error::ConfigError;
    ///
    /// let cache = CacheBuilder::new()
    ///     .policy(CachePolicy::Arc)
    ///     .capacity(3)
    ///     .build::<&str, i32>()
    ///     .unwrap();
    /// assert_eq!(cache.policy(), CachePolicy::Arc);
    ///
    /// let err = CacheBuilder::new().capacity(3).build::<&str, i32>().unwrap_err();
    /// assert_eq!(err, ConfigError::MissingPolicy);
    /// ```
    pub fn build<K, V>(self) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let Some(policy) = self.policy else {
            let err = ConfigError::MissingPolicy;
            debug!(%err, capacity = self.capacity, "rejected cache configuration");
            return Err(err);
        };
        Cache::from_config(CacheConfig::new(policy, self.capacity))
    }
}
