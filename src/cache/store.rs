//! Cache Store Module
//!
//! Bounded cache combining a hash index with an arena recency list and lazy
//! TTL expiration, all behind a single lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyList};
use crate::error::{CacheError, Result};

// == Inner State ==
/// Everything the lock protects. Index and order are only ever mutated
/// together, so no caller can observe one without the other.
#[derive(Debug)]
struct Inner<V> {
    /// Key -> slot handle in `order`
    index: HashMap<String, usize>,
    /// Recency order, front = most recently set or read
    order: RecencyList<CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
}

// == Bounded TTL Cache ==
/// Thread-safe LRU cache with a fixed capacity and per-entry expiry.
///
/// Expiry is lazy: an expired entry keeps its slot until a `get` touches it
/// or capacity pressure evicts it. `get_all` hides such entries but does not
/// reap them, so `len` can be larger than `get_all().len()`.
///
/// Every operation holds the lock for its full duration and never performs
/// I/O while holding it.
#[derive(Debug)]
pub struct BoundedTtlCache<V> {
    inner: Mutex<Inner<V>>,
    capacity: usize,
}

impl<V: Clone> BoundedTtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            inner: Mutex::new(Inner {
                index: HashMap::with_capacity(capacity),
                order: RecencyList::with_capacity(capacity),
                stats: CacheStats::new(),
            }),
            capacity,
        })
    }

    // == Set ==
    /// Stores a record that expires `ttl` from now.
    ///
    /// An existing key has its value and expiry replaced and moves to the
    /// front; the size does not change. A new key arriving at capacity first
    /// evicts the least recently used entry, expired or not.
    ///
    /// A zero `ttl` stores an entry that is already expired at the next read.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(&slot) = inner.index.get(&key) {
            if let Some(entry) = inner.order.get_mut(slot) {
                entry.refresh(value, ttl);
            }
            inner.order.move_to_front(slot);
            return;
        }

        if inner.order.len() >= self.capacity {
            if let Some(evicted) = inner.order.pop_back() {
                inner.index.remove(&evicted.key);
                inner.stats.record_eviction();
                debug!(key = %evicted.key, "Evicted least recently used entry");
            }
        }

        let slot = inner
            .order
            .push_front(CacheEntry::new(key.clone(), value, ttl));
        inner.index.insert(key, slot);
    }

    // == Get ==
    /// Retrieves a live record by key and marks it most recently used.
    ///
    /// An expired entry is removed on the spot and reported as a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let Some(&slot) = inner.index.get(key) else {
            inner.stats.record_miss();
            return None;
        };

        let expired = inner
            .order
            .get(slot)
            .map_or(true, CacheEntry::is_expired);
        if expired {
            inner.order.remove(slot);
            inner.index.remove(key);
            inner.stats.record_expiration();
            return None;
        }

        inner.order.move_to_front(slot);
        inner.stats.record_hit();
        inner.order.get(slot).map(|entry| entry.value.clone())
    }

    // == Get All ==
    /// Returns a copy of every entry that is live right now.
    ///
    /// Neither reorders nor removes anything; expired entries are skipped.
    pub fn get_all(&self) -> HashMap<String, V> {
        let inner = self.inner.lock();
        let now = Instant::now();

        inner
            .order
            .iter()
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    // == Get Top ==
    /// Returns the most recently set or read record without checking expiry.
    pub fn get_top(&self) -> Option<V> {
        let inner = self.inner.lock();
        inner.order.front().map(|entry| entry.value.clone())
    }

    // == Clear ==
    /// Removes every entry. Capacity and statistics counters are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.index.clear();
        inner.order.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.order.len());
        stats
    }

    // == Length ==
    /// Number of entries occupying a slot, including expired ones not yet reaped.
    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks that index and order describe the same set of entries.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let inner = self.inner.lock();

        if inner.index.len() != inner.order.len() || inner.order.len() > self.capacity {
            return false;
        }
        if inner.order.iter().count() != inner.order.len() {
            return false;
        }
        inner.index.iter().all(|(key, &slot)| {
            inner
                .order
                .get(slot)
                .map_or(false, |entry| &entry.key == key)
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread::{self, sleep};

    const LONG_TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store: BoundedTtlCache<String> = BoundedTtlCache::new(100).unwrap();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_rejects_zero_capacity() {
        let result = BoundedTtlCache::<String>::new(0);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_store_set_and_get() {
        let store = BoundedTtlCache::new(100).unwrap();

        store.set("key1", "value1".to_string(), LONG_TTL);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store: BoundedTtlCache<String> = BoundedTtlCache::new(100).unwrap();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let store = BoundedTtlCache::new(100).unwrap();

        store.set("key1", "value1".to_string(), LONG_TTL);
        store.set("key1", "value2".to_string(), LONG_TTL);

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_store_overwrite_moves_to_front() {
        let store = BoundedTtlCache::new(3).unwrap();

        store.set("a", 1, LONG_TTL);
        store.set("b", 2, LONG_TTL);
        store.set("c", 3, LONG_TTL);
        store.set("a", 10, LONG_TTL);

        assert_eq!(store.get_top(), Some(10));

        store.set("d", 4, LONG_TTL);
        assert_eq!(store.get("b"), None);
        assert_eq!(store.get("a"), Some(10));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let store = BoundedTtlCache::new(100).unwrap();

        store.set("key1", "value1".to_string(), Duration::from_millis(10));

        assert!(store.get("key1").is_some());
        assert!(store.get_all().contains_key("key1"));

        sleep(Duration::from_millis(15));

        assert!(!store.get_all().contains_key("key1"));
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_zero_ttl_expires_at_next_read() {
        let store = BoundedTtlCache::new(10).unwrap();

        store.set("restored", "value".to_string(), Duration::ZERO);

        // Still occupies a slot and is visible as top until reaped
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_top(), Some("value".to_string()));
        assert!(store.get_all().is_empty());

        assert_eq!(store.get("restored"), None);
        assert!(store.is_empty());
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_get_all_does_not_reap_or_reorder() {
        let store = BoundedTtlCache::new(3).unwrap();

        store.set("stale", 0, Duration::ZERO);
        store.set("a", 1, LONG_TTL);
        store.set("b", 2, LONG_TTL);

        let all = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get("a"), Some(&1));
        assert_eq!(all.get("b"), Some(&2));

        // Expired entry still holds its slot
        assert_eq!(store.len(), 3);
        assert_eq!(store.get_top(), Some(2));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_store_lru_eviction() {
        let store = BoundedTtlCache::new(3).unwrap();

        store.set("key1", "value1".to_string(), LONG_TTL);
        store.set("key2", "value2".to_string(), LONG_TTL);
        store.set("key3", "value3".to_string(), LONG_TTL);

        // Cache is full, adding key4 should evict key1 (oldest)
        store.set("key4", "value4".to_string(), LONG_TTL);

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let store = BoundedTtlCache::new(3).unwrap();

        store.set("A", 1, LONG_TTL);
        store.set("B", 2, LONG_TTL);
        store.set("C", 3, LONG_TTL);
        assert_eq!(store.get_top(), Some(3));

        // Access A to make it most recently used
        store.get("A").unwrap();
        assert_eq!(store.get_top(), Some(1));

        // Adding D should evict B (now oldest)
        store.set("D", 4, LONG_TTL);

        assert!(store.get("A").is_some());
        assert!(store.get("B").is_none());
        assert!(store.get("C").is_some());
    }

    #[test]
    fn test_store_eviction_ignores_expired_entries_elsewhere() {
        let store = BoundedTtlCache::new(2).unwrap();

        store.set("live", 1, LONG_TTL);
        store.set("stale", 2, Duration::ZERO);

        // Strict LRU: "live" is at the back, so it goes even though "stale" is expired
        store.set("new", 3, LONG_TTL);

        assert!(store.get("live").is_none());
        assert_eq!(store.get("new"), Some(3));
    }

    #[test]
    fn test_store_get_top_empty() {
        let store: BoundedTtlCache<u32> = BoundedTtlCache::new(5).unwrap();
        assert_eq!(store.get_top(), None);
    }

    #[test]
    fn test_store_clear() {
        let store = BoundedTtlCache::new(2).unwrap();

        store.set("test1", "test1".to_string(), LONG_TTL);
        store.set("test2", "test2".to_string(), LONG_TTL);
        store.clear();

        assert!(store.get_all().is_empty());
        assert!(store.is_empty());
        assert_eq!(store.get_top(), None);
        assert_eq!(store.capacity(), 2);

        store.set("a", "a".to_string(), LONG_TTL);
        store.set("b", "b".to_string(), LONG_TTL);
        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_store_stats() {
        let store = BoundedTtlCache::new(100).unwrap();

        store.set("key1", "value1".to_string(), LONG_TTL);
        store.get("key1").unwrap(); // hit
        let _ = store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_concurrent_mutation_keeps_index_and_order_in_sync() {
        let store = Arc::new(BoundedTtlCache::new(16).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..500 {
                        let key = format!("key{}", (i * 7 + t) % 40);
                        if i % 3 == 0 {
                            store.get(&key);
                        } else {
                            let ttl = if i % 5 == 0 { Duration::ZERO } else { LONG_TTL };
                            store.set(key, i, ttl);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(store.is_consistent());
        assert!(store.len() <= 16);
        assert!(store.get_all().len() <= store.len());
    }
}
