//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::cache::ESTIMATED_ENTRY_BYTES;

// == Stats Collector ==
/// Running counters owned by the cache state.
///
/// Hits and misses are atomics so lookups can record them while holding only
/// the shared side of the service lock. Evictions and size change only under
/// the exclusive side.
#[derive(Debug, Default)]
pub struct StatsCollector {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: u64,
    size: usize,
}

impl StatsCollector {
    // == Constructor ==
    /// Creates a collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Evictions ==
    /// Adds `count` sweeper removals to the eviction counter.
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    // == Update Size ==
    /// Updates the total entry count across all namespaces.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    // == Snapshot ==
    /// Returns an immutable copy of the counters with derived fields filled in.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.evictions,
            self.size,
        )
    }
}

// == Cache Stats ==
/// Point-in-time view of cache performance handed out to callers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups that returned a live value
    pub hits: u64,
    /// Number of lookups on absent or expired keys
    pub misses: u64,
    /// Number of expired entries removed by the sweeper
    pub evictions: u64,
    /// Current number of entries across all namespaces
    pub size: usize,
    /// hits / (hits + misses), 0 before the first lookup
    pub hit_ratio: f64,
    /// Approximate memory footprint in bytes
    pub memory_usage: u64,
}

impl CacheStats {
    /// Builds a snapshot from raw counters.
    pub fn new(hits: u64, misses: u64, evictions: u64, size: usize) -> Self {
        let total = hits + misses;
        let hit_ratio = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        Self {
            hits,
            misses,
            evictions,
            size,
            hit_ratio,
            memory_usage: size as u64 * ESTIMATED_ENTRY_BYTES,
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} hit_rate={:.2}% size={} evictions={} memory~{:.1}KB",
            self.hits,
            self.misses,
            self.hit_ratio * 100.0,
            self.size,
            self.evictions,
            self.memory_usage as f64 / 1024.0
        )
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StatsCollector::new().snapshot();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.size, 0);
        assert_eq!(stats.memory_usage, 0);
    }

    #[test]
    fn test_hit_ratio_no_requests() {
        let stats = StatsCollector::new().snapshot();
        assert_eq!(stats.hit_ratio, 0.0);
    }

    #[test]
    fn test_hit_ratio_all_hits() {
        let collector = StatsCollector::new();
        collector.record_hit();
        collector.record_hit();
        collector.record_hit();
        assert_eq!(collector.snapshot().hit_ratio, 1.0);
    }

    #[test]
    fn test_hit_ratio_all_misses() {
        let collector = StatsCollector::new();
        collector.record_miss();
        collector.record_miss();
        assert_eq!(collector.snapshot().hit_ratio, 0.0);
    }

    #[test]
    fn test_hit_ratio_mixed() {
        let collector = StatsCollector::new();
        collector.record_hit();
        collector.record_miss();
        assert_eq!(collector.snapshot().hit_ratio, 0.5);
    }

    #[test]
    fn test_record_evictions_accumulates() {
        let mut collector = StatsCollector::new();
        collector.record_evictions(2);
        collector.record_evictions(3);
        assert_eq!(collector.snapshot().evictions, 5);
    }

    #[test]
    fn test_memory_usage_tracks_size() {
        let mut collector = StatsCollector::new();
        collector.set_size(42);

        let stats = collector.snapshot();
        assert_eq!(stats.size, 42);
        assert_eq!(stats.memory_usage, 42 * ESTIMATED_ENTRY_BYTES);
    }

    #[test]
    fn test_display_summary() {
        let stats = CacheStats::new(3, 1, 2, 4);
        assert_eq!(
            stats.to_string(),
            "hits=3 misses=1 hit_rate=75.00% size=4 evictions=2 memory~4.0KB"
        );
    }

    #[test]
    fn test_stats_serialize() {
        let json = serde_json::to_value(CacheStats::new(1, 1, 0, 1)).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["hit_ratio"], 0.5);
        assert_eq!(json["memory_usage"], ESTIMATED_ENTRY_BYTES);
    }
}
