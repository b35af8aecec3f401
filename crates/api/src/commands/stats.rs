//! Statistics command

use std::time::Instant;

use dbsweep_domain::{DatabaseStats, HealthGrade, PenaltyBreakdown};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Snapshot plus the presentation data derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: DatabaseStats,
    pub grade: HealthGrade,
    /// Built-in penalty terms; an installed score override may disagree.
    pub penalties: PenaltyBreakdown,
}

/// Collect and score a fresh snapshot.
///
/// Never fails: unavailable diagnostics are reported as zero.
pub async fn get_database_stats(ctx: &AppContext) -> StatsReport {
    let command_name = "inspector::get_stats";
    let start = Instant::now();

    let stats = ctx.inspector.get_stats().await;
    let report = StatsReport {
        grade: HealthGrade::from_score(stats.health_score),
        penalties: ctx.inspector.penalties(&stats),
        stats,
    };

    log_command_execution(command_name, start.elapsed(), true);
    report
}
