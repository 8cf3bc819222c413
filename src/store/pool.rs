//! # Connection Pool
//!
//! A fixed set of SQLite connections handed out one request at a time.
//! Acquisition waits on a semaphore permit, so a saturated pool queues
//! callers instead of failing them.

use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};

use rusqlite::Connection;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};

struct PoolInner {
    idle: Mutex<Vec<Connection>>,
    permits: Arc<Semaphore>,
    size: usize,
}

impl PoolInner {
    fn checkin(&self, conn: Connection) {
        if self.permits.is_closed() {
            return;
        }
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(conn);
    }
}

/// Bounded pool of SQLite connections
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    /// Open `pool_size` connections to the configured database file.
    ///
    /// Blocking; call from a blocking context.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let mut connections = Vec::with_capacity(config.pool_size);
        for _ in 0..config.pool_size {
            connections.push(open_connection(config)?);
        }

        Ok(Self {
            inner: Arc::new(PoolInner {
                idle: Mutex::new(connections),
                permits: Arc::new(Semaphore::new(config.pool_size)),
                size: config.pool_size,
            }),
        })
    }

    /// Wait for a free connection
    pub async fn acquire(&self) -> StoreResult<PooledConnection> {
        let permit = self
            .inner
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| StoreError::PoolClosed)?;

        let conn = self
            .inner
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .ok_or(StoreError::PoolClosed)?;

        Ok(PooledConnection {
            conn: Some(conn),
            pool: Arc::clone(&self.inner),
            _permit: permit,
        })
    }

    /// Connections currently checked in
    pub fn idle_count(&self) -> usize {
        self.inner
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.permits.is_closed()
    }

    /// Wait until every connection is checked in, then close them all.
    ///
    /// Later `acquire` calls fail with `PoolClosed`.
    pub async fn close(&self) {
        let Ok(size) = u32::try_from(self.inner.size) else {
            return;
        };
        let Ok(all) = self.inner.permits.acquire_many(size).await else {
            return;
        };
        self.inner.permits.close();
        let drained: Vec<Connection> = self
            .inner
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        drop(all);
        drop(drained);
    }
}

fn open_connection(config: &StoreConfig) -> StoreResult<Connection> {
    let conn = Connection::open(&config.path).map_err(|source| StoreError::Open {
        path: config.path.clone(),
        source,
    })?;
    conn.busy_timeout(config.busy_timeout())?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    Ok(conn)
}

/// A connection on loan from the pool; returned on drop
pub struct PooledConnection {
    conn: Option<Connection>,
    pool: Arc<PoolInner>,
    _permit: OwnedSemaphorePermit,
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        // Only taken in Drop.
        self.conn.as_ref().expect("pooled connection already returned")
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.checkin(conn);
        }
    }
}
