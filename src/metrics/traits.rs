//! Recorder and snapshot traits.
//!
//! ```text
//!        ┌─────────────────────────────┐
//!        │     CoreMetricsRecorder     │
//!        │  get_hit/get_miss/insert    │
//!        │  evict/clear                │
//!        └──────────────┬──────────────┘
//!                       │
//!                       ▼
//!        ┌─────────────────────────────┐
//!        │     ArcMetricsRecorder      │
//!        │  b1/b2 ghost hits           │
//!        └─────────────────────────────┘
//!
//!   Consumption: MetricsSnapshotProvider<S>
//! ```

/// Counters every policy records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// ARC-specific adaptation signals.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    /// A key was found in B1 (recency ghost); `p` grew.
    fn record_b1_ghost_hit(&mut self);
    /// A key was found in B2 (frequency ghost); `p` shrank.
    fn record_b2_ghost_hit(&mut self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
