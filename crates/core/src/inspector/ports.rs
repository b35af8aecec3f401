//! Port interfaces for the bloat inspector
//!
//! `BloatStore` is the only way core logic touches the database. Every
//! selection predicate lives behind it exactly once, so the count a
//! diagnostic reports and the rows a cleanup removes cannot diverge.
//!
//! # Example
//!
//! ```no_run
//! use dbsweep_core::inspector::ports::{BloatStore, PostKind};
//!
//! async fn revisions(store: &impl BloatStore) {
//!     let pending = store.count_posts(PostKind::Revision).await.unwrap();
//!     println!("{pending} revisions");
//! }
//! ```

use async_trait::async_trait;
use dbsweep_domain::{AutoloadEntry, AutoloadSummary, Result};

/// Content rows selected by a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostKind {
    /// `post_type = 'revision'`
    Revision,
    /// `post_status = 'auto-draft'`
    AutoDraft,
    /// `post_status = 'trash'`
    Trashed,
}

/// Comment moderation states selected by a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStatus {
    Spam,
    Trash,
}

impl CommentStatus {
    /// Value stored in `comment_approved`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Trash => "trash",
        }
    }
}

/// Metadata tables checked for orphans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaKind {
    /// `postmeta` rows without a `posts` parent
    Post,
    /// `commentmeta` rows without a `comments` parent
    Comment,
}

/// Read and delete access to the bloat-bearing tables.
///
/// Counting methods are side-effect free. Per-row deletions return whether a
/// row was actually removed, so a target that vanished concurrently is not
/// counted; bulk deletions return their affected-row count.
#[async_trait]
pub trait BloatStore: Send + Sync {
    /* ---------------------------------------------------------------------- */
    /* Size introspection */
    /* ---------------------------------------------------------------------- */

    /// Total size of every table and index in bytes.
    ///
    /// `Ok(None)` means the store has no size metadata to offer.
    async fn total_size(&self) -> Result<Option<u64>>;

    /// Size of the options table including its indexes.
    async fn options_table_size(&self) -> Result<u64>;

    /* ---------------------------------------------------------------------- */
    /* Diagnostics */
    /* ---------------------------------------------------------------------- */

    /// Count and payload size of autoloaded options.
    async fn autoload_summary(&self) -> Result<AutoloadSummary>;

    /// Largest autoloaded options, descending by size, at most `limit`.
    async fn top_autoload(&self, limit: usize) -> Result<Vec<AutoloadEntry>>;

    /// Transient rows of any state (plain and site prefixes).
    async fn count_transients(&self) -> Result<u64>;

    /// Transient timeout rows whose deadline is before `now`.
    async fn count_expired_transients(&self, now: i64) -> Result<u64>;

    /// Network-wide transient timeout rows whose deadline is before `now`.
    async fn count_expired_site_transients(&self, now: i64) -> Result<u64>;

    /// Content rows of the given kind.
    async fn count_posts(&self, kind: PostKind) -> Result<u64>;

    /// Metadata rows whose parent no longer exists.
    async fn count_orphaned_meta(&self, kind: MetaKind) -> Result<u64>;

    /// Comments in the given moderation state.
    async fn count_comments(&self, status: CommentStatus) -> Result<u64>;

    /* ---------------------------------------------------------------------- */
    /* Target selection */
    /* ---------------------------------------------------------------------- */

    /// Names (without prefix) of transients whose timeout is before `now`.
    async fn expired_transient_keys(&self, now: i64) -> Result<Vec<String>>;

    /// Names (without prefix) of network-wide transients expired before `now`.
    async fn expired_site_transient_keys(&self, now: i64) -> Result<Vec<String>>;

    /// Identifiers of content rows of the given kind.
    async fn post_ids(&self, kind: PostKind) -> Result<Vec<i64>>;

    /// Identifiers of comments in the given moderation state.
    async fn comment_ids(&self, status: CommentStatus) -> Result<Vec<i64>>;

    /* ---------------------------------------------------------------------- */
    /* Deletion */
    /* ---------------------------------------------------------------------- */

    /// Delete a transient's value and timeout rows.
    async fn delete_transient(&self, key: &str) -> Result<bool>;

    /// Delete a network-wide transient's value and timeout rows.
    async fn delete_site_transient(&self, key: &str) -> Result<bool>;

    /// Delete every transient-pattern row regardless of expiry.
    async fn delete_all_transients(&self) -> Result<u64>;

    /// Delete a revision and its metadata; skipped when the row is no longer
    /// a revision.
    async fn delete_revision(&self, id: i64) -> Result<bool>;

    /// Permanently delete a content row with its metadata, comments and
    /// child revisions.
    async fn delete_post(&self, id: i64) -> Result<bool>;

    /// Permanently delete a comment and its metadata, re-parenting replies.
    async fn delete_comment(&self, id: i64) -> Result<bool>;

    /// Delete every orphaned metadata row of the given kind.
    async fn delete_orphaned_meta(&self, kind: MetaKind) -> Result<u64>;
}

/// External object cache integration.
pub trait ObjectCache: Send + Sync {
    /// Whether a cache backend is attached.
    fn is_enabled(&self) -> bool;

    /// Drop every cached entry. Returns `false` when nothing was flushed.
    fn flush(&self) -> Result<bool>;
}

/// Object cache stand-in for deployments without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledObjectCache;

impl ObjectCache for DisabledObjectCache {
    fn is_enabled(&self) -> bool {
        false
    }

    fn flush(&self) -> Result<bool> {
        Ok(false)
    }
}
