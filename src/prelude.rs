pub use crate::builder::{Cache, CacheBuilder};
pub use crate::config::{CacheConfig, CachePolicy};
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::ConfigError;
#[cfg(feature = "metrics")]
pub use crate::metrics::{CacheMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::arc::{ArcCache, ArcList};
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::CoreCache;
