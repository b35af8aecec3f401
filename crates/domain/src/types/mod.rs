//! Domain types and models

pub mod cleanup;
pub mod health;
pub mod stats;

// Re-export for convenience
pub use cleanup::{CleanupAction, CleanupResult};
pub use health::{HealthGrade, PenaltyBreakdown};
pub use stats::{AutoloadEntry, AutoloadSummary, DatabaseStats};
