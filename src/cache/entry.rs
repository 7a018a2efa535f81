//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with absolute expiry.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single keyed record together with the instant it stops being live.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key this entry is indexed under
    pub key: String,
    /// The stored record
    pub value: V,
    /// Expiration instant, None = beyond the representable range (never expires)
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` from now.
    ///
    /// A zero `ttl` produces an entry that is already expired at the next read.
    pub fn new(key: String, value: V, ttl: Duration) -> Self {
        Self {
            key,
            value,
            expires_at: expiry_after(Instant::now(), ttl),
        }
    }

    // == Refresh ==
    /// Replaces the record and restarts the TTL clock.
    pub fn refresh(&mut self, value: V, ttl: Duration) {
        self.value = value;
        self.expires_at = expiry_after(Instant::now(), ttl);
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// zero TTL is expired at the very instant it was written.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks whether the entry is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, or None when the sum overflows `Instant`.
fn expiry_after(now: Instant, ttl: Duration) -> Option<Instant> {
    now.checked_add(ttl)
}
