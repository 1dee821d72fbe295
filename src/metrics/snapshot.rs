use crate::metrics::metrics_impl::CacheMetrics;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_new: u64,
    pub insert_updates: u64,

    pub evicted_entries: u64,

    // ARC only; zero for other policies
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,

    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    pub(crate) fn capture(metrics: &CacheMetrics, cache_len: usize, capacity: usize) -> Self {
        Self {
            get_hits: metrics.get_hits,
            get_misses: metrics.get_misses,
            insert_new: metrics.insert_new,
            insert_updates: metrics.insert_updates,
            evicted_entries: metrics.evicted_entries,
            b1_ghost_hits: metrics.b1_ghost_hits,
            b2_ghost_hits: metrics.b2_ghost_hits,
            clears: metrics.clears,
            cache_len,
            capacity,
        }
    }

    /// Fraction of `get` calls that found a value; `0.0` before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.get_hits + self.get_misses;
        if total == 0 {
            0.0
        } else {
            self.get_hits as f64 / total as f64
        }
    }
}
