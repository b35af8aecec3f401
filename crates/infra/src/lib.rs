//! # dbsweep Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The SQLite bloat repository and its r2d2 connection pool
//! - The moka-backed object cache
//! - Configuration loading and the environment read-only source
//! - Conversions from infrastructure errors into `DbSweepError`
//!
//! ## Architecture
//! - Implements traits defined in `dbsweep-core`
//! - Depends on `dbsweep-domain` and `dbsweep-core`
//! - Contains all "impure" code (I/O, environment)

pub mod cache;
pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use cache::MokaObjectCache;
pub use config::EnvReadOnlySource;
pub use database::{DbManager, PoolConfig, SqliteBloatRepository, TableNames};
pub use errors::InfraError;
