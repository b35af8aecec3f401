//! Whitelisted cleanup dispatch.
//!
//! Action names are resolved against a `CleanupWhitelist` and only the
//! resulting `CleanupAction` is executed. Each action reuses the selection
//! predicate of the diagnostic that counted its targets.

use std::collections::BTreeMap;
use std::sync::Arc;

use dbsweep_domain::{CleanupAction, CleanupResult, Result};
use tracing::{debug, warn};

use super::ports::{BloatStore, CommentStatus, MetaKind, ObjectCache, PostKind};
use crate::clock::Clock;

/* -------------------------------------------------------------------------- */
/* Whitelist */
/* -------------------------------------------------------------------------- */

/// Accepted action names and the action each one runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupWhitelist {
    entries: BTreeMap<String, CleanupAction>,
}

impl CleanupWhitelist {
    /// Every action under its own identifier.
    pub fn standard() -> Self {
        let entries = CleanupAction::ALL
            .iter()
            .map(|action| (action.as_str().to_owned(), *action))
            .collect();
        Self { entries }
    }

    /// Whitelist with no entries; every name is rejected.
    pub fn empty() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Action a name maps to, if whitelisted.
    pub fn resolve(&self, name: &str) -> Option<CleanupAction> {
        self.entries.get(name).copied()
    }

    /// Stop accepting `name`. Returns the action it mapped to.
    pub fn remove(&mut self, name: &str) -> Option<CleanupAction> {
        self.entries.remove(name)
    }

    /// Accept `alias` as another name for `action`.
    pub fn alias(&mut self, alias: impl Into<String>, action: CleanupAction) {
        self.entries.insert(alias.into(), action);
    }

    /// Accept `action` under its own identifier again.
    pub fn allow(&mut self, action: CleanupAction) {
        self.alias(action.as_str(), action);
    }

    /// Whitelisted names with their actions, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, CleanupAction)> {
        self.entries.iter().map(|(name, action)| (name.as_str(), *action))
    }

    /// Distinct reachable actions in `CleanupAction::ALL` order.
    pub fn actions(&self) -> Vec<CleanupAction> {
        CleanupAction::ALL
            .into_iter()
            .filter(|action| self.entries.values().any(|entry| entry == action))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CleanupWhitelist {
    fn default() -> Self {
        Self::standard()
    }
}

/* -------------------------------------------------------------------------- */
/* Registry */
/* -------------------------------------------------------------------------- */

/// Runs one resolved cleanup action against the store.
pub struct CleanupRegistry {
    store: Arc<dyn BloatStore>,
    object_cache: Arc<dyn ObjectCache>,
    clock: Arc<dyn Clock>,
    multisite: bool,
    whitelist: CleanupWhitelist,
}

impl CleanupRegistry {
    pub fn new(
        store: Arc<dyn BloatStore>,
        object_cache: Arc<dyn ObjectCache>,
        clock: Arc<dyn Clock>,
        multisite: bool,
        whitelist: CleanupWhitelist,
    ) -> Self {
        Self { store, object_cache, clock, multisite, whitelist }
    }

    pub fn whitelist(&self) -> &CleanupWhitelist {
        &self.whitelist
    }

    /// Whitelisted action for `name`.
    pub fn resolve(&self, name: &str) -> Option<CleanupAction> {
        self.whitelist.resolve(name)
    }

    /// Execute `action`. Store failures are reported in the result together
    /// with the rows removed before the failure.
    pub async fn execute(&self, action: CleanupAction) -> CleanupResult {
        let mut deleted = 0u64;
        match self.run(action, &mut deleted).await {
            Ok(()) => {
                debug!(action = %action, deleted, "cleanup action completed");
                CleanupResult::completed(deleted)
            }
            Err(err) => {
                warn!(action = %action, deleted, error = %err, "cleanup action aborted");
                CleanupResult::failed(deleted, err)
            }
        }
    }

    async fn run(&self, action: CleanupAction, deleted: &mut u64) -> Result<()> {
        match action {
            CleanupAction::ExpiredTransients => {
                let now = self.clock.unix_timestamp();
                for key in self.store.expired_transient_keys(now).await? {
                    if self.store.delete_transient(&key).await? {
                        *deleted += 1;
                    }
                }
                if self.multisite {
                    for key in self.store.expired_site_transient_keys(now).await? {
                        if self.store.delete_site_transient(&key).await? {
                            *deleted += 1;
                        }
                    }
                }
            }
            CleanupAction::AllTransients => {
                *deleted += self.store.delete_all_transients().await?;
            }
            CleanupAction::Revisions => {
                for id in self.store.post_ids(PostKind::Revision).await? {
                    if self.store.delete_revision(id).await? {
                        *deleted += 1;
                    }
                }
            }
            CleanupAction::AutoDrafts => self.delete_posts(PostKind::AutoDraft, deleted).await?,
            CleanupAction::TrashedPosts => self.delete_posts(PostKind::Trashed, deleted).await?,
            CleanupAction::OrphanedPostmeta => {
                *deleted += self.store.delete_orphaned_meta(MetaKind::Post).await?;
            }
            CleanupAction::OrphanedCommentmeta => {
                *deleted += self.store.delete_orphaned_meta(MetaKind::Comment).await?;
            }
            CleanupAction::SpamComments => {
                self.delete_comments(CommentStatus::Spam, deleted).await?;
            }
            CleanupAction::TrashedComments => {
                self.delete_comments(CommentStatus::Trash, deleted).await?;
            }
            CleanupAction::ObjectCache => {
                if self.object_cache.is_enabled() && self.object_cache.flush()? {
                    *deleted += 1;
                }
            }
        }
        Ok(())
    }

    async fn delete_posts(&self, kind: PostKind, deleted: &mut u64) -> Result<()> {
        for id in self.store.post_ids(kind).await? {
            if self.store.delete_post(id).await? {
                *deleted += 1;
            }
        }
        Ok(())
    }

    async fn delete_comments(&self, status: CommentStatus, deleted: &mut u64) -> Result<()> {
        for id in self.store.comment_ids(status).await? {
            if self.store.delete_comment(id).await? {
                *deleted += 1;
            }
        }
        Ok(())
    }
}
