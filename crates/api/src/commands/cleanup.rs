//! Cleanup commands

use std::time::Instant;

use dbsweep_domain::{CleanupAction, CleanupResult};
use serde::Serialize;
use tracing::info;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// One whitelisted action name and the work it would currently do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    pub name: String,
    pub action: CleanupAction,
    pub label: &'static str,
    pub pending: u64,
}

/// Run one cleanup action by name.
pub async fn run_cleanup(ctx: &AppContext, action: &str) -> CleanupResult {
    let command_name = "inspector::run_cleanup";
    let start = Instant::now();

    info!(command = command_name, action, "Executing run_cleanup");
    let result = ctx.inspector.run_cleanup(action).await;

    log_command_execution(command_name, start.elapsed(), result.success);
    result
}

/// Whitelisted names with pending counts taken from a fresh snapshot.
pub async fn list_actions(ctx: &AppContext) -> Vec<ActionSummary> {
    let command_name = "inspector::list_actions";
    let start = Instant::now();

    let stats = ctx.inspector.get_stats().await;
    let actions = ctx
        .inspector
        .whitelist()
        .entries()
        .map(|(name, action)| ActionSummary {
            name: name.to_owned(),
            action,
            label: action.label(),
            pending: action.pending_count(&stats),
        })
        .collect();

    log_command_execution(command_name, start.elapsed(), true);
    actions
}

/// Current state of the read-only gate.
pub fn get_read_only(ctx: &AppContext) -> bool {
    ctx.inspector.is_read_only()
}
