//! Terminal rendering of command results.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use dbsweep_domain::{format_bytes, AutoloadEntry, CleanupResult};

use crate::commands::{ActionSummary, StatsReport};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header);
    table
}

fn right_align(table: &mut Table, column: usize) {
    if let Some(column) = table.column_mut(column) {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

/// Diagnostic counters and sizes of a snapshot.
pub fn stats_table(report: &StatsReport) -> Table {
    let stats = &report.stats;
    let size = |bytes: u64| {
        if stats.info_schema_available {
            format_bytes(bytes)
        } else {
            "unavailable".to_owned()
        }
    };

    let rows: Vec<(&str, String)> = vec![
        ("Database size", size(stats.total_db_size)),
        ("Options table size", size(stats.options_table_size)),
        ("Autoloaded options", stats.autoload_count.to_string()),
        ("Autoload size", format_bytes(stats.autoload_size)),
        ("Transients", stats.transient_count.to_string()),
        ("Expired transients", stats.expired_transients.to_string()),
        ("Expired site transients", stats.expired_site_transients.to_string()),
        ("Revisions", stats.revisions_count.to_string()),
        ("Auto-drafts", stats.auto_drafts_count.to_string()),
        ("Trashed posts", stats.trashed_posts_count.to_string()),
        ("Orphaned post meta", stats.orphaned_postmeta.to_string()),
        ("Orphaned comment meta", stats.orphaned_commentmeta.to_string()),
        ("Spam comments", stats.spam_comments.to_string()),
        ("Trashed comments", stats.trashed_comments.to_string()),
        ("Object cache", if stats.object_cache_enabled { "enabled" } else { "disabled" }.to_owned()),
        ("Health score", format!("{} ({})", stats.health_score, report.grade)),
    ];

    let mut table = table(vec!["Metric", "Value"]);
    for (metric, value) in rows {
        table.add_row(vec![Cell::new(metric), Cell::new(value)]);
    }
    right_align(&mut table, 1);
    table
}

/// Penalty terms behind the built-in score.
pub fn penalties_table(report: &StatsReport) -> Table {
    let mut table = table(vec!["Penalty", "Points"]);
    for (name, points) in report.penalties.terms() {
        table.add_row(vec![Cell::new(name), Cell::new(format!("{points:.2}"))]);
    }
    table.add_row(vec![Cell::new("total"), Cell::new(format!("{:.2}", report.penalties.total()))]);
    right_align(&mut table, 1);
    table
}

/// Largest autoloaded options.
pub fn autoload_table(entries: &[AutoloadEntry]) -> Table {
    let mut table = table(vec!["Option", "Size"]);
    for entry in entries {
        table.add_row(vec![Cell::new(&entry.name), Cell::new(format_bytes(entry.size))]);
    }
    right_align(&mut table, 1);
    table
}

/// Whitelisted actions and their pending counts.
pub fn actions_table(actions: &[ActionSummary]) -> Table {
    let mut table = table(vec!["Action", "Description", "Pending"]);
    for summary in actions {
        table.add_row(vec![
            Cell::new(&summary.name),
            Cell::new(summary.label),
            Cell::new(summary.pending),
        ]);
    }
    right_align(&mut table, 2);
    table
}

/// One-line outcome of a cleanup call.
pub fn cleanup_line(action: &str, result: &CleanupResult) -> String {
    let status = if result.success { "ok" } else { "failed" };
    format!("{action}: {status}: {}", result.message)
}
