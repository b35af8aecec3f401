//! # dbsweep Domain
//!
//! Business domain types and models for dbsweep.
//!
//! This crate contains:
//! - Diagnostic snapshot types (`DatabaseStats`, `AutoloadEntry`)
//! - Cleanup vocabulary (`CleanupAction`, `CleanupResult`)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and formatting helpers
//!
//! ## Architecture
//! - No dependencies on other dbsweep crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::format::format_bytes;
