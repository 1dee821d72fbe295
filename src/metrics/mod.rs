//! Operation counters for cache policies (feature `metrics`).
//!
//! Recording and reading are split: policies write through the recorder
//! traits in [`traits`], callers read a point-in-time
//! [`CacheMetricsSnapshot`] through [`traits::MetricsSnapshotProvider`].
//! Counters are plain `u64`s mutated under `&mut self`; the facade's lock
//! already serializes every write.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::CacheMetrics;
pub use snapshot::CacheMetricsSnapshot;
pub use traits::{ArcMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider};
