//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    backup_handler, clear_handler, get_handler, health_handler, history_handler, set_handler,
    stats_handler, top_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /:dataset/entries` - Store a record
/// - `DELETE /:dataset/entries` - Clear a dataset
/// - `GET /:dataset/entries/:key` - Retrieve a record by key
/// - `GET /:dataset/history` - All live records
/// - `GET /:dataset/top` - Most recently used record
/// - `POST /:dataset/cache/backup` - Snapshot a dataset to disk
/// - `GET /:dataset/stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/:dataset/entries", put(set_handler).delete(clear_handler))
        .route("/:dataset/entries/:key", get(get_handler))
        .route("/:dataset/history", get(history_handler))
        .route("/:dataset/top", get(top_handler))
        .route("/:dataset/stats", get(stats_handler))
        .route("/:dataset/cache/backup", post(backup_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
