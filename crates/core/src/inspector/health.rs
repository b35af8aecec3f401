//! Health scoring.
//!
//! | term | applies when | penalty | cap |
//! |---|---|---|---|
//! | autoload | size > 1 MiB | (MiB - 1) * 10 | 30 |
//! | expired transients | > 10 | n / 10 | 15 |
//! | revisions | > 100 | (n - 100) / 50 | 20 |
//! | orphaned meta | post + comment > 50 | n / 100 | 15 |
//! | spam and trash | comments + posts > 50 | n / 50 | 10 |
//! | auto-drafts | > 5 | n | 10 |
//!
//! Terms are summed as reals, capped at 100 and truncated toward zero.

use std::sync::Arc;

use dbsweep_domain::constants::{BYTES_PER_MIB, MAX_HEALTH_SCORE};
use dbsweep_domain::{DatabaseStats, PenaltyBreakdown};

use super::hooks::{HealthScoreFilter, IdentityScoreFilter};

const AUTOLOAD_CAP: f64 = 30.0;
const EXPIRED_TRANSIENTS_CAP: f64 = 15.0;
const REVISIONS_CAP: f64 = 20.0;
const ORPHANED_META_CAP: f64 = 15.0;
const SPAM_TRASH_CAP: f64 = 10.0;
const AUTO_DRAFTS_CAP: f64 = 10.0;

/// Compute every capped penalty term for a snapshot.
pub fn compute_penalties(stats: &DatabaseStats) -> PenaltyBreakdown {
    let mut breakdown = PenaltyBreakdown::default();

    if stats.autoload_size > BYTES_PER_MIB {
        let mib = stats.autoload_size as f64 / BYTES_PER_MIB as f64;
        breakdown.autoload = ((mib - 1.0) * 10.0).min(AUTOLOAD_CAP);
    }

    if stats.expired_transients > 10 {
        breakdown.expired_transients =
            (stats.expired_transients as f64 / 10.0).min(EXPIRED_TRANSIENTS_CAP);
    }

    if stats.revisions_count > 100 {
        breakdown.revisions = ((stats.revisions_count - 100) as f64 / 50.0).min(REVISIONS_CAP);
    }

    let orphaned = stats.orphaned_meta_total();
    if orphaned > 50 {
        breakdown.orphaned_meta = (orphaned as f64 / 100.0).min(ORPHANED_META_CAP);
    }

    let spam_trash = stats.spam_trash_total();
    if spam_trash > 50 {
        breakdown.spam_trash = (spam_trash as f64 / 50.0).min(SPAM_TRASH_CAP);
    }

    if stats.auto_drafts_count > 5 {
        breakdown.auto_drafts = (stats.auto_drafts_count as f64).min(AUTO_DRAFTS_CAP);
    }

    breakdown
}

/// Built-in score in `0..=100`, before any override.
pub fn builtin_score(stats: &DatabaseStats) -> i64 {
    let total = compute_penalties(stats).total();
    (total.trunc() as i64).clamp(0, MAX_HEALTH_SCORE)
}

/// Scores snapshots, applying the configured override last.
#[derive(Clone)]
pub struct HealthScorer {
    filter: Arc<dyn HealthScoreFilter>,
}

impl HealthScorer {
    pub fn new(filter: Arc<dyn HealthScoreFilter>) -> Self {
        Self { filter }
    }

    /// Score a snapshot. The override's return value is not re-validated.
    pub fn score(&self, stats: &DatabaseStats) -> i64 {
        self.filter.filter(builtin_score(stats), stats)
    }
}

impl Default for HealthScorer {
    fn default() -> Self {
        Self::new(Arc::new(IdentityScoreFilter))
    }
}
