//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};

use dbsweep_domain::{DbSweepError, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::{info, warn};

use super::pragmas::{apply_connection_pragmas, PoolConfig};
use super::tables::TableNames;
use crate::errors::InfraError;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Pooled connection handed out by [`DbManager`].
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Database manager that wraps an r2d2 SQLite pool.
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let config = PoolConfig { max_size: pool_size.max(1), ..PoolConfig::default() };
        Self::with_config(db_path, config)
    }

    /// Create a new manager with explicit pool settings.
    pub fn with_config<P: AsRef<Path>>(db_path: P, config: PoolConfig) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let pragma_config = config.clone();
        let manager = SqliteConnectionManager::file(&path)
            .with_init(move |conn| apply_connection_pragmas(conn, &pragma_config));

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|err| {
                warn!(db_path = %path.display(), error = %err, "failed to create connection pool");
                DbSweepError::from(InfraError::from(err))
            })?;

        info!(
            db_path = %path.display(),
            max_connections = config.max_size,
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(|err| InfraError::from(err).into())
    }

    /// Create the inspected tables for `tables` if they do not exist.
    ///
    /// Intended for development and test databases.
    pub fn install_schema(&self, tables: &TableNames) -> Result<()> {
        let conn = self.get_connection()?;
        let sql = SCHEMA_SQL.replace("{prefix}", tables.prefix());
        conn.execute_batch(&sql).map_err(map_sql_error)?;
        info!(prefix = tables.prefix(), "schema installed");
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Perform a health check to verify database connectivity.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0))
            .map_err(map_sql_error)?;
        Ok(())
    }
}

fn map_sql_error(err: rusqlite::Error) -> DbSweepError {
    DbSweepError::from(InfraError::from(err))
}
