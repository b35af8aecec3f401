//! Diagnostic collection.
//!
//! Runs the fixed catalogue of bloat diagnostics against a `BloatStore` and
//! assembles an unscored `DatabaseStats`. A failing diagnostic never aborts
//! the collection; its field keeps the zero value and a warning is logged.

use std::sync::Arc;

use dbsweep_domain::constants::TOP_AUTOLOAD_LIMIT;
use dbsweep_domain::{DatabaseStats, Result};
use tracing::{debug, warn};

use super::ports::{BloatStore, CommentStatus, MetaKind, ObjectCache, PostKind};
use crate::clock::Clock;

/// Collects a `DatabaseStats` snapshot. Scoring is left to `HealthScorer`.
pub struct StatsCollector {
    store: Arc<dyn BloatStore>,
    object_cache: Arc<dyn ObjectCache>,
    clock: Arc<dyn Clock>,
    multisite: bool,
}

impl StatsCollector {
    pub fn new(
        store: Arc<dyn BloatStore>,
        object_cache: Arc<dyn ObjectCache>,
        clock: Arc<dyn Clock>,
        multisite: bool,
    ) -> Self {
        Self { store, object_cache, clock, multisite }
    }

    /// Run every diagnostic once. `health_score` is left at 0.
    pub async fn collect(&self) -> DatabaseStats {
        let mut stats = DatabaseStats::default();
        let now = self.clock.unix_timestamp();

        // Size introspection degrades as a pair: without the total, the
        // options table size is not attempted.
        match self.store.total_size().await {
            Ok(Some(total)) => {
                stats.total_db_size = total;
                stats.info_schema_available = true;
                stats.options_table_size =
                    or_zero("options_table_size", self.store.options_table_size().await);
            }
            Ok(None) => {
                debug!("size introspection returned no data");
            }
            Err(err) => {
                warn!(diagnostic = "total_db_size", error = %err, "size introspection unavailable");
            }
        }

        let autoload = or_zero("autoload_summary", self.store.autoload_summary().await);
        stats.autoload_count = autoload.count;
        stats.autoload_size = autoload.size;

        stats.transient_count = or_zero("transient_count", self.store.count_transients().await);
        stats.expired_transients =
            or_zero("expired_transients", self.store.count_expired_transients(now).await);
        if self.multisite {
            stats.expired_site_transients = or_zero(
                "expired_site_transients",
                self.store.count_expired_site_transients(now).await,
            );
        }

        stats.revisions_count =
            or_zero("revisions_count", self.store.count_posts(PostKind::Revision).await);
        stats.auto_drafts_count =
            or_zero("auto_drafts_count", self.store.count_posts(PostKind::AutoDraft).await);
        stats.trashed_posts_count =
            or_zero("trashed_posts_count", self.store.count_posts(PostKind::Trashed).await);

        stats.orphaned_postmeta =
            or_zero("orphaned_postmeta", self.store.count_orphaned_meta(MetaKind::Post).await);
        stats.orphaned_commentmeta = or_zero(
            "orphaned_commentmeta",
            self.store.count_orphaned_meta(MetaKind::Comment).await,
        );

        stats.spam_comments =
            or_zero("spam_comments", self.store.count_comments(CommentStatus::Spam).await);
        stats.trashed_comments =
            or_zero("trashed_comments", self.store.count_comments(CommentStatus::Trash).await);

        stats.object_cache_enabled = self.object_cache.is_enabled();

        let mut top = or_zero("top_autoload", self.store.top_autoload(TOP_AUTOLOAD_LIMIT).await);
        top.sort_by(|a, b| b.size.cmp(&a.size));
        top.truncate(TOP_AUTOLOAD_LIMIT);
        stats.top_autoload = top;

        stats
    }
}

fn or_zero<T: Default>(diagnostic: &'static str, result: Result<T>) -> T {
    result.unwrap_or_else(|err| {
        warn!(diagnostic, error = %err, "diagnostic failed; reporting zero");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use dbsweep_domain::DbSweepError;

    use super::*;

    #[test]
    fn or_zero_passes_values_through() {
        assert_eq!(or_zero("count", Ok(7u64)), 7);
    }

    #[test]
    fn or_zero_swallows_errors() {
        let failed: Result<u64> = Err(DbSweepError::Database("locked".into()));
        assert_eq!(or_zero("count", failed), 0);
    }
}
