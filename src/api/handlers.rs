//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::BoundedTtlCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    BackupResponse, ClearResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse, TopResponse,
};

/// Records are opaque JSON documents; the service never inspects them.
pub type Record = Value;

/// One dataset's cache.
pub type RecordCache = BoundedTtlCache<Record>;

/// Application state shared across all handlers.
///
/// Holds one cache per dataset, each built once at startup and shared by
/// reference for the lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    caches: Arc<HashMap<String, Arc<RecordCache>>>,
    config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState from already-built caches.
    pub fn new(config: Config, caches: HashMap<String, RecordCache>) -> Self {
        let caches = caches
            .into_iter()
            .map(|(name, cache)| (name, Arc::new(cache)))
            .collect();

        Self {
            caches: Arc::new(caches),
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Every configured dataset is restored from its snapshot, or starts empty
    /// when there is none.
    ///
    /// # Errors
    /// Fails on an invalid capacity or on a snapshot that exists but cannot be
    /// read or parsed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut caches = HashMap::with_capacity(config.datasets.len());

        for dataset in &config.datasets {
            let path = config.snapshot_path(dataset);
            let cache = RecordCache::restore(config.capacity, &path, config.restore_ttl())?;
            info!(dataset = %dataset, entries = cache.len(), "Dataset cache ready");
            caches.insert(dataset.clone(), cache);
        }

        Ok(Self::new(config.clone(), caches))
    }

    /// Looks up a dataset's cache.
    pub fn cache(&self, dataset: &str) -> Result<Arc<RecordCache>> {
        self.caches
            .get(dataset)
            .cloned()
            .ok_or_else(|| CacheError::UnknownDataset(dataset.to_string()))
    }

    /// Names of all served datasets.
    pub fn datasets(&self) -> impl Iterator<Item = &str> {
        self.caches.keys().map(String::as_str)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Snapshots one dataset on the blocking pool, keeping file I/O off the
    /// async workers. Returns the snapshot path and the number of entries written.
    pub async fn snapshot(&self, dataset: &str) -> Result<(PathBuf, usize)> {
        let cache = self.cache(dataset)?;
        let path = self.config.snapshot_path(dataset);
        let target = path.clone();

        let entries = tokio::task::spawn_blocking(move || cache.snapshot(&target))
            .await
            .map_err(|e| CacheError::Internal(format!("Snapshot task failed: {}", e)))??;

        Ok((path, entries))
    }

    /// Snapshots every dataset, logging failures instead of stopping at the
    /// first one. Returns how many datasets were written.
    pub async fn snapshot_all(&self) -> usize {
        let mut written = 0;
        for dataset in self.datasets() {
            match self.snapshot(dataset).await {
                Ok(_) => written += 1,
                Err(e) => warn!(dataset = %dataset, error = %e, "Cache snapshot failed"),
            }
        }
        written
    }
}

/// Handler for PUT /:dataset/entries
///
/// Stores a record under a key with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let cache = state.cache(&dataset)?;
    let ttl = req
        .ttl
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| state.config.default_ttl());
    cache.set(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /:dataset/entries/:key
///
/// Retrieves a live record by key, refreshing its recency.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((dataset, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    let cache = state.cache(&dataset)?;

    match cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /:dataset/history
///
/// Returns every live record keyed by its cache key.
pub async fn history_handler(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Json<HashMap<String, Record>>> {
    let cache = state.cache(&dataset)?;
    Ok(Json(cache.get_all()))
}

/// Handler for GET /:dataset/top
///
/// Returns the most recently set or read record.
pub async fn top_handler(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Json<TopResponse>> {
    let cache = state.cache(&dataset)?;

    cache
        .get_top()
        .map(|value| Json(TopResponse { value }))
        .ok_or_else(|| CacheError::NotFound(format!("{} is empty", dataset)))
}

/// Handler for DELETE /:dataset/entries
///
/// Removes every entry from a dataset's cache.
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Json<ClearResponse>> {
    let cache = state.cache(&dataset)?;
    cache.clear();
    info!(dataset = %dataset, "Dataset cache cleared");

    Ok(Json(ClearResponse::new(dataset)))
}

/// Handler for POST /:dataset/cache/backup
///
/// Writes the dataset's live entries to its snapshot file.
pub async fn backup_handler(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Json<BackupResponse>> {
    let (path, entries) = state.snapshot(&dataset).await?;

    Ok(Json(BackupResponse::new(
        &dataset,
        path.display().to_string(),
        entries,
    )))
}

/// Handler for GET /:dataset/stats
///
/// Returns current cache statistics.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Json<StatsResponse>> {
    let cache = state.cache(&dataset)?;
    Ok(Json(StatsResponse::new(&cache.stats(), cache.capacity())))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
