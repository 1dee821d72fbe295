//! Eviction policies.
//!
//! Each policy is a single-threaded [`CoreCache`](crate::traits::CoreCache)
//! implementation. Use [`crate::builder::Cache`] for shared access.

pub mod arc;
pub mod fifo;
pub mod lfu;
pub mod lru;
