//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for the GET operation (GET /:dataset/entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored record
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /:dataset/entries)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the most recent entry (GET /:dataset/top)
#[derive(Debug, Clone, Serialize)]
pub struct TopResponse {
    /// The most recently set or read record; it may already be expired
    pub value: Value,
}

/// Response body for the CLEAR operation (DELETE /:dataset/entries)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// The dataset that was cleared
    pub dataset: String,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(dataset: impl Into<String>) -> Self {
        let dataset = dataset.into();
        Self {
            message: format!("Dataset '{}' cleared", dataset),
            dataset,
        }
    }
}

/// Response body for a snapshot (POST /:dataset/cache/backup)
#[derive(Debug, Clone, Serialize)]
pub struct BackupResponse {
    /// Success message
    pub message: String,
    /// Where the snapshot was written
    pub path: String,
    /// Number of live entries written
    pub entries: usize,
}

impl BackupResponse {
    pub fn new(dataset: &str, path: impl Into<String>, entries: usize) -> Self {
        Self {
            message: format!("Cache backup for '{}' created successfully", dataset),
            path: path.into(),
            entries,
        }
    }
}

/// Response body for the stats endpoint (GET /:dataset/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Number of expired entries reaped on read
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Fixed capacity of the cache
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, capacity: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
