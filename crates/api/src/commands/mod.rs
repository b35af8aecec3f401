//! Command wrappers - the operations the CLI exposes
//!
//! Each wrapper times its call and logs the outcome through
//! `utils::logging::log_command_execution`.

mod cleanup;
mod schema;
mod stats;

pub use cleanup::*;
pub use schema::*;
pub use stats::*;
