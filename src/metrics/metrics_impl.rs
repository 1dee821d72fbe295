use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evicted_entries: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub clears: u64,
}

impl CoreMetricsRecorder for CacheMetrics {
    #[inline]
    fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    #[inline]
    fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    #[inline]
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    #[inline]
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    #[inline]
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    #[inline]
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ArcMetricsRecorder for CacheMetrics {
    #[inline]
    fn record_b1_ghost_hit(&mut self) {
        self.b1_ghost_hits += 1;
    }

    #[inline]
    fn record_b2_ghost_hit(&mut self) {
        self.b2_ghost_hits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorders_bump_their_counter() {
        let mut metrics = CacheMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_insert_new();
        metrics.record_insert_update();
        metrics.record_evicted_entry();
        metrics.record_b1_ghost_hit();
        metrics.record_b2_ghost_hit();
        metrics.record_clear();

        assert_eq!(metrics.get_hits, 2);
        assert_eq!(metrics.get_misses, 1);
        assert_eq!(metrics.insert_new, 1);
        assert_eq!(metrics.insert_updates, 1);
        assert_eq!(metrics.evicted_entries, 1);
        assert_eq!(metrics.b1_ghost_hits, 1);
        assert_eq!(metrics.b2_ghost_hits, 1);
        assert_eq!(metrics.clears, 1);
    }
}
