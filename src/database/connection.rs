//! Database connection management
//!
//! [`ConnectionPool`] is the only shared mutable resource of the store. Every
//! repository operation acquires exactly one connection, runs its statement
//! (or the fixed statement sequence of a composite read) on it, and hands it
//! back when the [`PooledConnection`] guard drops. Dropping happens on every
//! exit path, `?` early returns included, so a failed statement can never
//! leak a connection.

use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use crate::config::DatabaseConfig;
use crate::utils::errors::StoreResult;
use crate::utils::logging::log_pool_status;

/// A connection checked out of the pool; returned to it on drop
pub type PooledConnection = PoolConnection<Postgres>;

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig::from(&DatabaseConfig::default())
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            acquire_timeout: config.acquire_timeout(),
            idle_timeout: config.idle_timeout(),
            max_lifetime: config.max_lifetime(),
        }
    }
}

/// Point-in-time view of pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: usize,
    pub max_connections: u32,
}

impl PoolStatus {
    /// Connections currently checked out by operations
    pub fn in_use(&self) -> usize {
        (self.size as usize).saturating_sub(self.idle)
    }
}

/// Bounded pool of Postgres connections
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    inner: PgPool,
    max_connections: u32,
}

impl ConnectionPool {
    /// Connect and keep `min_connections` warm.
    ///
    /// A `SELECT 1` round trip verifies the database is reachable before the
    /// pool is handed out.
    pub async fn connect(config: &PoolConfig) -> StoreResult<Self> {
        let inner = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(&config.url)
            .await?;

        let pool = Self::from_pool(inner, config.max_connections);
        pool.health_check().await?;

        tracing::info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Database connection pool created successfully"
        );
        Ok(pool)
    }

    /// Wrap an already configured sqlx pool.
    pub fn from_pool(inner: PgPool, max_connections: u32) -> Self {
        Self {
            inner,
            max_connections,
        }
    }

    /// Check out a connection, waiting up to the acquire timeout when all
    /// `max_connections` are in use. Timing out is a storage fault.
    pub async fn acquire(&self) -> StoreResult<PooledConnection> {
        let conn = self.inner.acquire().await?;
        Ok(conn)
    }

    /// Return a connection before the end of its scope.
    ///
    /// The logged status is the state before the release: the connection is
    /// handed back to the idle set on a background task after the drop.
    pub fn release(&self, conn: PooledConnection) -> PoolStatus {
        let status = self.status();
        log_pool_status(status.size, status.idle, status.max_connections);
        drop(conn);
        status
    }

    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            size: self.inner.size(),
            idle: self.inner.num_idle(),
            max_connections: self.max_connections,
        }
    }

    /// Check database health
    pub async fn health_check(&self) -> StoreResult<()> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.inner.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub(crate) fn inner(&self) -> &PgPool {
        &self.inner
    }
}

/// Create a new database connection pool
pub async fn create_pool(config: &PoolConfig) -> StoreResult<ConnectionPool> {
    ConnectionPool::connect(config).await
}
