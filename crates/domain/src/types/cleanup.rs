//! Cleanup vocabulary: the closed set of actions and their outcome.

use serde::{Deserialize, Serialize};

use super::stats::DatabaseStats;
use crate::impl_identifier_conversions;

/// Every cleanup the inspector knows how to perform.
///
/// Action names arriving from callers are resolved to a variant at the
/// boundary; a name that maps to no variant is never executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupAction {
    /// Transients whose timeout has passed.
    ExpiredTransients,
    /// Every transient regardless of expiry.
    AllTransients,
    /// Post revisions.
    Revisions,
    /// Auto-draft placeholders.
    AutoDrafts,
    /// Posts in the trash.
    TrashedPosts,
    /// Post metadata without a parent post.
    OrphanedPostmeta,
    /// Comment metadata without a parent comment.
    OrphanedCommentmeta,
    /// Spam comments.
    SpamComments,
    /// Trashed comments.
    TrashedComments,
    /// Flush of the object cache.
    ObjectCache,
}

impl_identifier_conversions!(CleanupAction {
    ExpiredTransients => "expired_transients",
    AllTransients => "all_transients",
    Revisions => "revisions",
    AutoDrafts => "auto_drafts",
    TrashedPosts => "trashed_posts",
    OrphanedPostmeta => "orphaned_postmeta",
    OrphanedCommentmeta => "orphaned_commentmeta",
    SpamComments => "spam_comments",
    TrashedComments => "trashed_comments",
    ObjectCache => "object_cache",
});

impl CleanupAction {
    /// All actions in display order.
    pub const ALL: [CleanupAction; 10] = [
        Self::ExpiredTransients,
        Self::AllTransients,
        Self::Revisions,
        Self::AutoDrafts,
        Self::TrashedPosts,
        Self::OrphanedPostmeta,
        Self::OrphanedCommentmeta,
        Self::SpamComments,
        Self::TrashedComments,
        Self::ObjectCache,
    ];

    /// Human readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ExpiredTransients => "Expired Transients",
            Self::AllTransients => "All Transients",
            Self::Revisions => "Post Revisions",
            Self::AutoDrafts => "Auto-Drafts",
            Self::TrashedPosts => "Trashed Posts",
            Self::OrphanedPostmeta => "Orphaned Post Meta",
            Self::OrphanedCommentmeta => "Orphaned Comment Meta",
            Self::SpamComments => "Spam Comments",
            Self::TrashedComments => "Trashed Comments",
            Self::ObjectCache => "Object Cache",
        }
    }

    /// Number of targets the snapshot reports for this action.
    ///
    /// `ObjectCache` has no row count: it reports one pending flush while a
    /// cache is attached.
    pub fn pending_count(&self, stats: &DatabaseStats) -> u64 {
        match self {
            Self::ExpiredTransients => {
                stats.expired_transients.saturating_add(stats.expired_site_transients)
            }
            Self::AllTransients => stats.transient_count,
            Self::Revisions => stats.revisions_count,
            Self::AutoDrafts => stats.auto_drafts_count,
            Self::TrashedPosts => stats.trashed_posts_count,
            Self::OrphanedPostmeta => stats.orphaned_postmeta,
            Self::OrphanedCommentmeta => stats.orphaned_commentmeta,
            Self::SpamComments => stats.spam_comments,
            Self::TrashedComments => stats.trashed_comments,
            Self::ObjectCache => u64::from(stats.object_cache_enabled),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Cleanup Result */
/* -------------------------------------------------------------------------- */

/// Outcome of a single cleanup invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupResult {
    /// Whether the action ran to completion
    pub success: bool,

    /// Rows (or flush operations) actually removed
    pub deleted: u64,

    /// Human readable summary
    pub message: String,
}

impl CleanupResult {
    /// Message returned when the read-only gate rejects a cleanup.
    pub const READ_ONLY_MESSAGE: &'static str =
        "read-only mode is enabled; cleanup actions are disabled";

    /// Message returned when the caller is not allowed to mutate the store.
    pub const UNAUTHORIZED_MESSAGE: &'static str = "unauthorized";

    /// A completed cleanup.
    pub fn completed(deleted: u64) -> Self {
        Self { success: true, deleted, message: format!("Cleaned up {deleted} items.") }
    }

    /// Rejected by the read-only gate; nothing ran.
    pub fn read_only() -> Self {
        Self::rejected(Self::READ_ONLY_MESSAGE)
    }

    /// Rejected because the caller is not an administrator; nothing ran.
    pub fn unauthorized() -> Self {
        Self::rejected(Self::UNAUTHORIZED_MESSAGE)
    }

    /// Rejected because `action` is not whitelisted; nothing ran.
    pub fn invalid_action(action: &str) -> Self {
        Self::rejected(format!("invalid action: {action}"))
    }

    /// The store failed mid-action. `deleted` reports what was removed
    /// before the failure.
    pub fn failed(deleted: u64, reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            deleted,
            message: format!("cleanup aborted after {deleted} items: {reason}"),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self { success: false, deleted: 0, message: message.into() }
    }
}
