//! Store Statistics Module
//!
//! Tracks lookups and removals performed by the store worker.

use serde::Serialize;

// == Store Stats ==
/// Store counters plus a snapshot of the current footprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups for absent keys
    pub misses: u64,
    /// Number of entries dropped to satisfy the count or size cap
    pub evictions: u64,
    /// Number of entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Current number of stored buckets
    pub total_entries: usize,
    /// Current aggregate payload size in bytes
    pub total_size: u64,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Update Footprint ==
    /// Updates the entry count and aggregate size snapshot.
    pub fn set_footprint(&mut self, entries: usize, size: u64) {
        self.total_entries = entries;
        self.total_size = size;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StoreStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.total_size, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(StoreStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = StoreStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_removals() {
        let mut stats = StoreStats::new();
        stats.record_evictions(3);
        stats.record_evictions(0);
        stats.record_expiration();
        assert_eq!(stats.evictions, 3);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_set_footprint() {
        let mut stats = StoreStats::new();
        stats.set_footprint(42, 1024);
        assert_eq!(stats.total_entries, 42);
        assert_eq!(stats.total_size, 1024);
    }
}
