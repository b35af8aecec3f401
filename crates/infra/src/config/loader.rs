//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `DBSWEEP_DB_PATH`: Database file path (required)
//! - `DBSWEEP_DB_POOL_SIZE`: Connection pool size
//! - `DBSWEEP_TABLE_PREFIX`: Table prefix of the inspected schema
//! - `DBSWEEP_READ_ONLY`: Default read-only state (true/false)
//! - `DBSWEEP_MULTISITE`: Whether the deployment is a network (true/false)
//! - `DBSWEEP_OBJECT_CACHE`: Attach the in-process object cache (true/false)
//! - `DBSWEEP_OBJECT_CACHE_CAPACITY`: Maximum object cache entries
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./dbsweep.json` or `./dbsweep.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use dbsweep_domain::constants::{
    DEFAULT_OBJECT_CACHE_CAPACITY, DEFAULT_POOL_SIZE, DEFAULT_TABLE_PREFIX,
};
use dbsweep_domain::{Config, DatabaseConfig, DbSweepError, InspectorConfig, Result};

pub(crate) const ENV_DB_PATH: &str = "DBSWEEP_DB_PATH";
pub(crate) const ENV_DB_POOL_SIZE: &str = "DBSWEEP_DB_POOL_SIZE";
pub(crate) const ENV_TABLE_PREFIX: &str = "DBSWEEP_TABLE_PREFIX";
pub(crate) const ENV_READ_ONLY: &str = "DBSWEEP_READ_ONLY";
pub(crate) const ENV_MULTISITE: &str = "DBSWEEP_MULTISITE";
pub(crate) const ENV_OBJECT_CACHE: &str = "DBSWEEP_OBJECT_CACHE";
pub(crate) const ENV_OBJECT_CACHE_CAPACITY: &str = "DBSWEEP_OBJECT_CACHE_CAPACITY";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `DbSweepError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `DBSWEEP_DB_PATH` is required; everything else falls back to its
/// default.
///
/// # Errors
/// Returns `DbSweepError::Config` if the path is missing or a value is
/// invalid.
pub fn load_from_env() -> Result<Config> {
    let path = env_var(ENV_DB_PATH)?;
    let pool_size = env_parse(ENV_DB_POOL_SIZE, DEFAULT_POOL_SIZE)?;
    let table_prefix =
        std::env::var(ENV_TABLE_PREFIX).unwrap_or_else(|_| DEFAULT_TABLE_PREFIX.to_string());
    let object_cache_capacity =
        env_parse(ENV_OBJECT_CACHE_CAPACITY, DEFAULT_OBJECT_CACHE_CAPACITY)?;

    let config = Config {
        database: DatabaseConfig { path, pool_size, table_prefix },
        inspector: InspectorConfig {
            read_only: env_bool(ENV_READ_ONLY, false),
            multisite: env_bool(ENV_MULTISITE, false),
            object_cache: env_bool(ENV_OBJECT_CACHE, false),
            object_cache_capacity,
        },
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `DbSweepError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DbSweepError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DbSweepError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DbSweepError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DbSweepError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DbSweepError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(DbSweepError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(base: &Path) -> Vec<PathBuf> {
    vec![
        base.join("config.json"),
        base.join("config.toml"),
        base.join("dbsweep.json"),
        base.join("dbsweep.toml"),
        base.join("../config.json"),
        base.join("../config.toml"),
        base.join("../../config.json"),
        base.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        DbSweepError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional numeric environment variable.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| DbSweepError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
pub(crate) fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key).ok().map(|s| parse_bool(&s)).unwrap_or(default)
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
