//! Cache configuration: which policy, how many entries.
//!
//! A [`CacheConfig`] is plain data. It can be assembled in code, parsed from a
//! policy name, or (with the `serde` feature) deserialized from any serde
//! format. [`CacheConfig::validate`] is the single place configuration is
//! checked; every construction path goes through it.
//!
//! ```
//! use cacheevict::config::{CacheConfig, CachePolicy};
//!
//! let config = CacheConfig::new("ARC".parse::<CachePolicy>().unwrap(), 64);
//! let cache = config.build::<u64, String>().unwrap();
//! assert_eq!(cache.policy(), CachePolicy::Arc);
//! assert_eq!(cache.capacity(), 64);
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::builder::Cache;
use crate::error::ConfigError;

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CachePolicy {
    /// First in, first out. Reads never reorder.
    Fifo,
    /// Least recently used.
    Lru,
    /// Least frequently used, ties broken by recency.
    Lfu,
    /// Adaptive Replacement Cache.
    Arc,
}

impl CachePolicy {
    /// Every supported policy, in declaration order.
    pub const ALL: [CachePolicy; 4] = [
        CachePolicy::Fifo,
        CachePolicy::Lru,
        CachePolicy::Lfu,
        CachePolicy::Arc,
    ];

    /// Lowercase name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            CachePolicy::Fifo => "fifo",
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
            CachePolicy::Arc => "arc",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    /// Parses a policy name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CachePolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownPolicy(s.to_owned()))
    }
}

/// Policy and capacity for one cache instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    pub policy: CachePolicy,
    /// Maximum number of resident entries.
    pub capacity: usize,
}

impl CacheConfig {
    pub fn new(policy: CachePolicy, capacity: usize) -> Self {
        Self { policy, capacity }
    }

    /// Checks that the configuration can produce a working cache.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Validates and builds a thread-safe cache.
    pub fn build<K, V>(self) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        Cache::from_config(self)
    }
}
