//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Load and validate configuration
//! 2. Initialize logging
//! 3. Open the store, verify connectivity, ensure the books table
//! 4. Serve HTTP until Ctrl-C
//! 5. Drain in-flight store work and close the pool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::{Store, StoreConfig};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Database settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Default log filter; `RUST_LOG` takes precedence (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            store: StoreConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            None => Config::default(),
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    CliError::config_error(format!(
                        "Failed to read config {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                serde_json::from_str(&content)
                    .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.store.validate()?;
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            CliError::config_error(format!("Invalid log_level '{}': {}", self.log_level, e))
        })?;
        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, port: Option<u16>, database: Option<PathBuf>) -> Self {
        if let Some(port) = port {
            self.http.port = port;
        }
        if let Some(database) = database {
            self.store.path = database;
        }
        self
    }
}

/// Run a CLI command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            port,
            database,
        } => {
            let config = Config::load(config.as_deref())?.with_overrides(port, database);
            init_logging(&config.log_level);
            serve(config)
        }
        Command::Init { config, database } => {
            let config = Config::load(config.as_deref())?.with_overrides(None, database);
            init_logging(&config.log_level);
            init(config)
        }
    }
}

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Serve the API until interrupted
pub fn serve(config: Config) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let store = Arc::new(open_store(&config.store).await?);
        let server = HttpServer::new(config.http.clone(), Arc::clone(&store));

        let result = server
            .start(shutdown_signal())
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)));

        info!("closing database connections");
        store.close().await;
        result
    })
}

/// Create the database file and schema, then exit
pub fn init(config: Config) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let store = open_store(&config.store).await?;
        store.close().await;
        info!(path = %config.store.path.display(), "database initialized");
        Ok::<(), CliError>(())
    })
}

/// Open the pool, prove connectivity and ensure the books table exists
pub async fn open_store(config: &StoreConfig) -> CliResult<Store> {
    let store = Store::open(config.clone()).await?;
    store.ping().await?;
    store.ensure_schema().await?;

    info!(
        path = %config.path.display(),
        pool_size = config.pool_size,
        "database ready"
    );
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C; shutdown only by process kill");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_without_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.store.pool_size, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("book-api.json");
        fs::write(&path, r#"{"http": {"port": 8081}, "store": {"pool_size": 3}}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.store.pool_size, 3);
        assert_eq!(config.store.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("book-api.json");

        fs::write(&path, "not json").unwrap();
        assert!(Config::load(Some(&path)).is_err());

        fs::write(&path, r#"{"store": {"pool_size": 0}}"#).unwrap();
        assert!(Config::load(Some(&path)).is_err());

        assert!(Config::load(Some(&tmp.path().join("missing.json"))).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some(9000), Some(PathBuf::from("/tmp/b.db")));
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.store.path, PathBuf::from("/tmp/b.db"));
    }

    #[test]
    fn test_init_creates_schema() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("books.db");
        let config = Config::default().with_overrides(None, Some(db.clone()));

        init(config).unwrap();

        let conn = rusqlite::Connection::open(&db).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'books'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }
}
