//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::SNAPSHOT_FILE_NAME;

/// Fifteen days, the freshness window for records fetched from upstream APIs.
const FIFTEEN_DAYS_SECS: u64 = 15 * 24 * 60 * 60;
/// TTL given to records re-hydrated from a snapshot.
const ONE_DAY_SECS: u64 = 24 * 60 * 60;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries each dataset cache can hold
    pub capacity: usize,
    /// Default TTL in seconds for entries set without an explicit TTL
    pub default_ttl: u64,
    /// TTL in seconds given to entries loaded from a snapshot
    pub restore_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Directory holding one `<dataset>/cache.json` snapshot per dataset
    pub cache_dir: PathBuf,
    /// Names of the datasets served, one cache each
    pub datasets: Vec<String>,
    /// Whether every dataset is snapshotted on graceful shutdown
    pub snapshot_on_shutdown: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Entries per dataset cache (default: 15)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 1296000, 15 days)
    /// - `RESTORE_TTL` - TTL in seconds for restored entries (default: 86400)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CACHE_DIR` - Snapshot root directory (default: /app/cache)
    /// - `DATASETS` - Comma-separated dataset names (default: bartender,dinner)
    /// - `SNAPSHOT_ON_SHUTDOWN` - Snapshot all datasets on exit (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            restore_ttl: parse_var("RESTORE_TTL").unwrap_or(defaults.restore_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            datasets: env::var("DATASETS")
                .ok()
                .map(|v| parse_datasets(&v))
                .filter(|names| !names.is_empty())
                .unwrap_or(defaults.datasets),
            snapshot_on_shutdown: parse_var("SNAPSHOT_ON_SHUTDOWN")
                .unwrap_or(defaults.snapshot_on_shutdown),
        }
    }

    /// Default TTL as a `Duration`.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Restore TTL as a `Duration`.
    pub fn restore_ttl(&self) -> Duration {
        Duration::from_secs(self.restore_ttl)
    }

    /// Location of a dataset's snapshot file.
    pub fn snapshot_path(&self, dataset: &str) -> PathBuf {
        self.cache_dir.join(dataset).join(SNAPSHOT_FILE_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 15,
            default_ttl: FIFTEEN_DAYS_SECS,
            restore_ttl: ONE_DAY_SECS,
            server_port: 8080,
            cache_dir: PathBuf::from("/app/cache"),
            datasets: vec!["bartender".to_string(), "dinner".to_string()],
            snapshot_on_shutdown: false,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Splits a comma-separated list, dropping blanks and duplicates.
fn parse_datasets(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 15);
        assert_eq!(config.default_ttl(), Duration::from_secs(15 * 24 * 60 * 60));
        assert_eq!(config.restore_ttl(), Duration::from_secs(24 * 60 * 60));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.datasets, vec!["bartender", "dinner"]);
        assert!(!config.snapshot_on_shutdown);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for var in [
            "CACHE_CAPACITY",
            "DEFAULT_TTL",
            "RESTORE_TTL",
            "SERVER_PORT",
            "CACHE_DIR",
            "DATASETS",
            "SNAPSHOT_ON_SHUTDOWN",
        ] {
            env::remove_var(var);
        }

        let config = Config::from_env();
        assert_eq!(config.capacity, 15);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cache_dir, PathBuf::from("/app/cache"));
        assert_eq!(config.datasets.len(), 2);
    }

    #[test]
    fn test_snapshot_path() {
        let config = Config {
            cache_dir: PathBuf::from("/srv/cache"),
            ..Config::default()
        };
        assert_eq!(
            config.snapshot_path("dinner"),
            PathBuf::from("/srv/cache/dinner/cache.json")
        );
    }

    #[test]
    fn test_parse_datasets() {
        assert_eq!(
            parse_datasets(" bartender, dinner,,bartender , "),
            vec!["bartender", "dinner"]
        );
        assert!(parse_datasets(" , ").is_empty());
    }
}
