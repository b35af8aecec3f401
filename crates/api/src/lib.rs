//! # dbsweep application
//!
//! Application layer - command wrappers, CLI definition and entry point
//! support.
//!
//! This crate contains:
//! - Command wrappers around `InspectorService` with structured logging
//! - Application context (dependency injection)
//! - The `dbsweep` command-line surface and its table rendering
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use cli::{resolve_config, Cli, Commands};
pub use commands::*;
pub use context::*;
