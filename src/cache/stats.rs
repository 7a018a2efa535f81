//! Cache Counters Module
//!
//! Running totals kept under the cache lock and reported by the stats endpoint.

use serde::Serialize;

// == Cache Stats ==
/// Lifetime counters for one cache. `clear` leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a live record
    pub hits: u64,
    /// Reads that returned nothing, expired records included
    pub misses: u64,
    /// Records pushed out to make room for a new key
    pub evictions: u64,
    /// Records dropped by a read that found them past their expiry
    pub expirations: u64,
    /// Slots in use, expired-but-unreaped records included
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of reads served from the cache, 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            reads => self.hits as f64 / reads as f64,
        }
    }

    // == Recorders ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// A read that reaps an expired record is also a miss.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
        self.misses += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
