//! Error types for the cache and its HTTP boundary
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and the service around it.
///
/// Misses are not errors at the cache level: `get` and `get_top` return
/// `Option`. `NotFound` only exists so HTTP handlers can turn a miss into 404.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Capacity must be a positive number of entries
    #[error("Invalid cache capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Snapshot file could not be read or written
    #[error("Snapshot I/O error at {}: {source}", .path.display())]
    SnapshotIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot file exists but is not a valid key -> record document
    #[error("Snapshot format error at {}: {source}", .path.display())]
    SnapshotFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Key not found (or expired) in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// No cache is configured under this dataset name
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::NotFound(_) | CacheError::UnknownDataset(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidCapacity(_)
            | CacheError::SnapshotIo { .. }
            | CacheError::SnapshotFormat { .. }
            | CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache and server.
pub type Result<T> = std::result::Result<T, CacheError>;
