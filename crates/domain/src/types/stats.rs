//! Diagnostic snapshot types
//!
//! `DatabaseStats` is recomputed on every collection and never persisted. It
//! is primarily consumed by the UI layer and by the cleanup controls, which
//! disable an action whose pending count is zero.

use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Database Statistics */
/* -------------------------------------------------------------------------- */

/// Snapshot of every bloat diagnostic plus the derived health score.
///
/// # Field Invariants
/// - Counts and sizes are unsigned and default to 0 when a diagnostic fails
/// - When `info_schema_available` is false, `total_db_size` and
///   `options_table_size` are 0; callers must not read 0 as "empty database"
/// - `top_autoload` holds at most 20 entries, largest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    /// Sum of all table data and index pages in bytes
    pub total_db_size: u64,

    /// Whether size introspection was available
    pub info_schema_available: bool,

    /// Size of the options table and its indexes in bytes
    pub options_table_size: u64,

    /// Number of options loaded on every request
    pub autoload_count: u64,

    /// Total payload size of autoloaded options in bytes
    pub autoload_size: u64,

    /// Transient rows in any state
    pub transient_count: u64,

    /// Transient timeout rows whose deadline has passed
    pub expired_transients: u64,

    /// Expired network-wide transients (multisite only, otherwise 0)
    #[serde(default)]
    pub expired_site_transients: u64,

    /// Post revision rows
    pub revisions_count: u64,

    /// Auto-draft placeholder rows
    pub auto_drafts_count: u64,

    /// Posts in the trash
    pub trashed_posts_count: u64,

    /// Post metadata rows without a parent post
    pub orphaned_postmeta: u64,

    /// Comment metadata rows without a parent comment
    pub orphaned_commentmeta: u64,

    /// Comments marked as spam
    pub spam_comments: u64,

    /// Comments in the trash
    pub trashed_comments: u64,

    /// Whether an object cache integration is active
    pub object_cache_enabled: bool,

    /// Largest autoloaded options, descending by size
    pub top_autoload: Vec<AutoloadEntry>,

    /// Derived bloat score (lower is healthier)
    pub health_score: i64,
}

impl DatabaseStats {
    /// Combined orphaned metadata rows (post + comment).
    pub fn orphaned_meta_total(&self) -> u64 {
        self.orphaned_postmeta.saturating_add(self.orphaned_commentmeta)
    }

    /// Combined spam and trash rows (spam comments, trashed comments, trashed
    /// posts).
    pub fn spam_trash_total(&self) -> u64 {
        self.spam_comments
            .saturating_add(self.trashed_comments)
            .saturating_add(self.trashed_posts_count)
    }
}

/// A single autoloaded option and its payload size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoloadEntry {
    /// Option name
    pub name: String,

    /// Payload size in bytes
    pub size: u64,
}

impl AutoloadEntry {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }
}

/// Count and total payload of autoloaded options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoloadSummary {
    pub count: u64,
    pub size: u64,
}
