//! Configuration loading and management
//!
//! This module provides utilities for loading application configuration
//! from environment variables and files, plus the environment-driven
//! read-only source.

pub mod loader;
pub mod read_only;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
pub use read_only::EnvReadOnlySource;
