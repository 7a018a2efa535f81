//! API Module
//!
//! HTTP handlers and routing exposing the dataset caches.
//!
//! # Endpoints
//! - `PUT /:dataset/entries` - Store a record
//! - `DELETE /:dataset/entries` - Clear a dataset
//! - `GET /:dataset/entries/:key` - Retrieve a record by key
//! - `GET /:dataset/history` - All live records
//! - `GET /:dataset/top` - Most recently used record
//! - `POST /:dataset/cache/backup` - Snapshot a dataset to disk
//! - `GET /:dataset/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
