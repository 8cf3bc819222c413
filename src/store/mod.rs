//! # Store Module
//!
//! SQLite-backed query executor. A `Store` owns a bounded connection pool
//! and runs parameterized statements on it, off the async runtime.
//!
//! Uniqueness violations surface as `StoreError::Conflict`; everything else
//! the database reports is a generic failure.

pub mod builder;
pub mod config;
pub mod errors;
pub mod pool;
pub mod schema;
pub mod value;

pub use builder::{QueryBuilder, Statement};
pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use pool::{ConnectionPool, PooledConnection};
pub use value::{Row, SqlValue};

use rusqlite::{params_from_iter, Connection};
use tracing::debug;

/// Outcome of a statement that returns no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    pub rows_affected: usize,
    pub last_insert_id: i64,
}

/// Handle to the book database
pub struct Store {
    pool: ConnectionPool,
}

impl Store {
    /// Open the pool described by `config`
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let pool = tokio::task::spawn_blocking(move || ConnectionPool::open(&config)).await??;
        Ok(Self { pool })
    }

    /// Round-trip a trivial query to prove the database is usable
    pub async fn ping(&self) -> StoreResult<()> {
        self.with_connection(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    /// Create the books table and its indexes if they are missing
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        self.with_connection(|conn| {
            conn.execute_batch(schema::BOOKS_SCHEMA)?;
            Ok(())
        })
        .await
    }

    /// Run a statement and collect every row it yields
    pub async fn query(&self, statement: Statement) -> StoreResult<Vec<Row>> {
        debug!(sql = statement.sql(), params = statement.params().len(), "query");
        self.with_connection(move |conn| run_query(conn, &statement))
            .await
    }

    /// Run a statement that yields no rows
    pub async fn execute(&self, statement: Statement) -> StoreResult<Execution> {
        debug!(sql = statement.sql(), params = statement.params().len(), "execute");
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare_cached(statement.sql())?;
            let rows_affected = stmt.execute(params_from_iter(statement.params().iter()))?;
            Ok(Execution {
                rows_affected,
                last_insert_id: conn.last_insert_rowid(),
            })
        })
        .await
    }

    /// Wait for in-flight statements, then close every connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn with_connection<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.pool.acquire().await?;
        tokio::task::spawn_blocking(move || f(&conn)).await?
    }
}

fn run_query(conn: &Connection, statement: &Statement) -> StoreResult<Vec<Row>> {
    let mut stmt = conn.prepare_cached(statement.sql())?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut rows = stmt.query(params_from_iter(statement.params().iter()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            values.push((name.clone(), SqlValue::from(row.get_ref(idx)?)));
        }
        out.push(Row::new(values));
    }
    Ok(out)
}
