//! Application configuration structures
//!
//! Loaded by `dbsweep_infra::config` from environment variables or a
//! JSON/TOML file.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OBJECT_CACHE_CAPACITY, DEFAULT_POOL_SIZE, DEFAULT_TABLE_PREFIX};
use crate::{DbSweepError, Result};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub inspector: InspectorConfig,
}

impl Config {
    /// Configuration for a database file with every other setting defaulted.
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            database: DatabaseConfig {
                path: path.into(),
                pool_size: DEFAULT_POOL_SIZE,
                table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            },
            inspector: InspectorConfig::default(),
        }
    }

    /// Validate values that cannot be expressed through serde alone.
    pub fn validate(&self) -> Result<()> {
        self.database.validate()
    }
}

/// Connection settings for the inspected store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,

    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Prefix shared by every table of the inspected schema (e.g. `wp_`)
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
}

impl DatabaseConfig {
    /// Table names are spliced into SQL, so the prefix is restricted to
    /// `[A-Za-z0-9_]`.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(DbSweepError::Config("database path must not be empty".into()));
        }
        if !is_valid_table_prefix(&self.table_prefix) {
            return Err(DbSweepError::Config(format!(
                "invalid table prefix '{}': only ASCII letters, digits and '_' are allowed",
                self.table_prefix
            )));
        }
        Ok(())
    }
}

/// Behaviour switches for the inspector services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Default state of the read-only gate
    #[serde(default)]
    pub read_only: bool,

    /// Whether the deployment is a multi-site network (enables site-wide
    /// transient diagnostics and cleanup)
    #[serde(default)]
    pub multisite: bool,

    /// Whether an in-process object cache is attached
    #[serde(default)]
    pub object_cache: bool,

    /// Maximum entries held by the object cache
    #[serde(default = "default_object_cache_capacity")]
    pub object_cache_capacity: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            multisite: false,
            object_cache: false,
            object_cache_capacity: DEFAULT_OBJECT_CACHE_CAPACITY,
        }
    }
}

/// Returns true when `prefix` is non-empty and made of `[A-Za-z0-9_]`.
pub fn is_valid_table_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_table_prefix() -> String {
    DEFAULT_TABLE_PREFIX.to_string()
}

fn default_object_cache_capacity() -> u64 {
    DEFAULT_OBJECT_CACHE_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: Config = serde_json::from_str(r#"{"database": {"path": "site.db"}}"#).unwrap();

        assert_eq!(config.database.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config.database.table_prefix, "wp_");
        assert!(!config.inspector.read_only);
        assert!(!config.inspector.multisite);
        assert_eq!(config.inspector.object_cache_capacity, DEFAULT_OBJECT_CACHE_CAPACITY);
    }

    #[test]
    fn prefix_validation_rejects_sql_fragments() {
        assert!(is_valid_table_prefix("wp_"));
        assert!(is_valid_table_prefix("site2_"));
        assert!(!is_valid_table_prefix(""));
        assert!(!is_valid_table_prefix("wp_; DROP TABLE x; --"));
        assert!(!is_valid_table_prefix("wp-"));

        let mut config = Config::for_path("site.db");
        config.database.table_prefix = "bad prefix".into();
        assert!(matches!(config.validate(), Err(DbSweepError::Config(_))));
    }

    #[test]
    fn empty_path_is_rejected() {
        let config = Config::for_path("  ");
        assert!(config.validate().is_err());
    }
}
