//! Snapshot Module
//!
//! Persists live cache contents as an indented JSON document and rebuilds a
//! cache from one. Expiry instants are not persisted: restored records get a
//! fresh, caller-chosen TTL.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::cache::BoundedTtlCache;
use crate::error::{CacheError, Result};

impl<V: Clone + Serialize> BoundedTtlCache<V> {
    // == Snapshot ==
    /// Writes every live entry to `path`, replacing whatever was there.
    ///
    /// Contents are copied under the lock and written after it is released.
    /// The document is written to a uniquely named sibling temp file and
    /// renamed into place, so a failed write leaves the previous snapshot intact.
    ///
    /// # Errors
    /// `SnapshotFormat` if a record cannot be encoded, `SnapshotIo` if the file
    /// cannot be written. The in-memory cache is untouched either way.
    pub fn snapshot(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        // Sorted keys keep successive snapshots diffable
        let records: BTreeMap<String, V> = self.get_all().into_iter().collect();

        let bytes = serde_json::to_vec_pretty(&records).map_err(|source| {
            CacheError::SnapshotFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let io_err = |source: std::io::Error| CacheError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        };

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(io_err)?;

        // Each write gets its own temp file, so overlapping snapshots of one
        // path never rename each other's file away
        let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(&bytes).map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;

        info!(
            count = records.len(),
            path = %path.display(),
            "Cache snapshot written"
        );
        Ok(records.len())
    }
}

impl<V: Clone + DeserializeOwned> BoundedTtlCache<V> {
    // == Restore ==
    /// Builds a cache of `capacity` from the snapshot at `path`.
    ///
    /// A missing file yields an empty cache. Every record is inserted through
    /// `set` with `ttl`; with more records than `capacity`, ordinary LRU
    /// eviction applies in key order.
    ///
    /// # Errors
    /// `InvalidCapacity` for a zero capacity, `SnapshotIo` if the file exists
    /// but cannot be read, `SnapshotFormat` if it cannot be parsed. A corrupt
    /// snapshot is never silently discarded.
    pub fn restore(capacity: usize, path: impl AsRef<Path>, ttl: Duration) -> Result<Self> {
        let path = path.as_ref();
        let cache = Self::new(capacity)?;

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No cache snapshot found, starting empty");
                return Ok(cache);
            }
            Err(source) => {
                return Err(CacheError::SnapshotIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let records: BTreeMap<String, V> =
            serde_json::from_slice(&bytes).map_err(|source| CacheError::SnapshotFormat {
                path: path.to_path_buf(),
                source,
            })?;

        let count = records.len();
        for (key, value) in records {
            cache.set(key, value, ttl);
        }

        info!(count, path = %path.display(), "Cache restored from snapshot");
        Ok(cache)
    }
}
