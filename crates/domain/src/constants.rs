//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// One mebibyte, the unit the autoload penalty is expressed in.
pub const BYTES_PER_MIB: u64 = 1_048_576;

/// Maximum number of entries reported in `DatabaseStats::top_autoload`.
pub const TOP_AUTOLOAD_LIMIT: usize = 20;

/// Upper bound of the built-in health score.
pub const MAX_HEALTH_SCORE: i64 = 100;

/// Scores at or below this value are graded `Good`.
pub const GOOD_SCORE_CEILING: i64 = 40;

/// Scores at or below this value (and above `GOOD_SCORE_CEILING`) are graded
/// `Warning`.
pub const WARNING_SCORE_CEILING: i64 = 70;

// Configuration defaults
pub const DEFAULT_POOL_SIZE: u32 = 4;
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";
pub const DEFAULT_OBJECT_CACHE_CAPACITY: u64 = 10_000;

// Option name prefixes of cached key-value entries
pub const TRANSIENT_PREFIX: &str = "_transient_";
pub const TRANSIENT_TIMEOUT_PREFIX: &str = "_transient_timeout_";
pub const SITE_TRANSIENT_PREFIX: &str = "_site_transient_";
pub const SITE_TRANSIENT_TIMEOUT_PREFIX: &str = "_site_transient_timeout_";

/// `autoload` column values that mark an option as loaded on every request.
pub const AUTOLOAD_VALUES: [&str; 4] = ["yes", "on", "auto-on", "auto"];
