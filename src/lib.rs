//! Firelink Cache - bounded LRU cache with lazy TTL expiry
//!
//! Memoizes recipe and drink lookups per dataset, serves "history" and
//! "most recent" views over HTTP, and snapshots contents to JSON files.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::BoundedTtlCache;
pub use config::Config;
pub use error::{CacheError, Result};
