//! Store Configuration
//!
//! Database file location, pool capacity and lock wait bound.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// SQLite store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file (default: "./books.db")
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Number of pooled connections (default: 10)
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// How long a statement waits on a locked database (default: 5000)
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from("./books.db")
}

fn default_pool_size() -> usize {
    10
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            pool_size: default_pool_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl StoreConfig {
    /// Create a config for the given database file with default pool settings
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Reject settings the pool cannot run with
    pub fn validate(&self) -> StoreResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig("path must not be empty".to_string()));
        }
        if self.pool_size == 0 {
            return Err(StoreError::InvalidConfig("pool_size must be > 0".to_string()));
        }
        if u32::try_from(self.pool_size).is_err() {
            return Err(StoreError::InvalidConfig(format!(
                "pool_size {} is too large",
                self.pool_size
            )));
        }
        if self.busy_timeout_ms == 0 {
            return Err(StoreError::InvalidConfig(
                "busy_timeout_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
