//! Pool configuration and per-connection pragmas.

use std::time::Duration;

use rusqlite::Connection;

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// Connection timeout
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite operations
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 4,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
        }
    }
}

/// Apply connection-level pragmas
///
/// - WAL mode for better concurrency
/// - NORMAL synchronous mode for balanced safety/performance
/// - Busy timeout for handling lock contention
///
/// Foreign keys are forced off; the inspected schema relates rows by
/// convention only.
pub fn apply_connection_pragmas(conn: &Connection, config: &PoolConfig) -> rusqlite::Result<()> {
    let mut pragma_sql = String::new();

    if config.enable_wal {
        pragma_sql.push_str("PRAGMA journal_mode=WAL;\n");
        // WAL autocheckpoint (checkpoint after 1000 pages)
        pragma_sql.push_str("PRAGMA wal_autocheckpoint=1000;\n");
    }

    pragma_sql.push_str("PRAGMA synchronous=NORMAL;\n");
    pragma_sql.push_str("PRAGMA foreign_keys=OFF;\n");

    conn.execute_batch(&pragma_sql)?;
    conn.busy_timeout(config.busy_timeout)?;

    Ok(())
}
