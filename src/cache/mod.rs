//! Cache Module
//!
//! Provides a bounded in-memory cache with lazy TTL expiration, LRU eviction
//! and JSON snapshots.

mod entry;
mod lru;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::RecencyList;
pub use stats::CacheStats;
pub use store::BoundedTtlCache;

// == Public Constants ==
/// File name of a dataset's snapshot inside its cache directory
pub const SNAPSHOT_FILE_NAME: &str = "cache.json";
