//! cacheevict: fixed-capacity in-process key/value caches with pluggable
//! eviction policies.
//!
//! Four policies share one contract, [`CoreCache`]:
//!
//! | Policy | Type                          | Victim                                   |
//! |--------|-------------------------------|------------------------------------------|
//! | FIFO   | [`policy::fifo::FifoCache`]   | oldest insertion                         |
//! | LRU    | [`policy::lru::LruCache`]     | least recently referenced                |
//! | LFU    | [`policy::lfu::LfuCache`]     | lowest frequency, then least recent      |
//! | ARC    | [`policy::arc::ArcCache`]     | adaptive split between recency/frequency |
//!
//! Policies are single-threaded. [`Cache`] wraps one behind a mutex and is the
//! type most callers want:
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use cacheevict::{CacheBuilder, CachePolicy};
//!
//! let cache = Arc::new(
//!     CacheBuilder::new()
//!         .policy(CachePolicy::Arc)
//!         .capacity(128)
//!         .build::<u32, String>()
//!         .unwrap(),
//! );
//!
//! let writer = {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || cache.add(7, "seven".to_string()))
//! };
//! writer.join().unwrap();
//! assert_eq!(cache.get(&7).as_deref(), Some("seven"));
//! ```

pub mod builder;
pub mod config;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use builder::{Cache, CacheBuilder};
pub use config::{CacheConfig, CachePolicy};
pub use error::ConfigError;
pub use traits::CoreCache;
