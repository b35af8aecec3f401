//! Command-line surface of the `dbsweep` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dbsweep_domain::{Config, Result};
use dbsweep_infra::config::{load, load_from_file};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "dbsweep")]
#[command(author, version, about = "Database bloat statistics, health scoring and cleanup")]
pub struct Cli {
    /// Configuration file (JSON or TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database file; overrides the configured path
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Reject every cleanup action
    #[arg(long, global = true)]
    pub read_only: bool,

    /// Treat the database as a multi-site network
    #[arg(long, global = true)]
    pub multisite: bool,

    /// Debug-level logging when `RUST_LOG` is unset
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// `object_cache` flushes a cache owned by this process, not an external one.
const OBJECT_CACHE_NOTE: &str = "Note: `object_cache` flushes the in-process cache enabled by \
`inspector.object_cache`. A single CLI run never fills it, so the action only \
removes entries when dbsweep is embedded as a library.";

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect and print database statistics
    Stats {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run one cleanup action
    #[command(after_help = OBJECT_CACHE_NOTE)]
    Clean {
        /// Action name, e.g. `expired_transients`
        action: String,
    },
    /// List whitelisted cleanup actions with pending counts
    Actions,
    /// Print whether cleanup is disabled
    ReadOnly,
    /// Create the inspected tables if missing (development databases only)
    InitSchema,
}

/// Build the effective configuration for `cli`.
///
/// An explicit `--config` file must load. Without one, the environment and
/// the standard file locations are tried; `--db` alone is enough to run with
/// defaults. Command-line flags are applied last.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match (&cli.config, &cli.db) {
        (Some(path), _) => load_from_file(Some(path.clone()))?,
        (None, Some(db)) => load().unwrap_or_else(|err| {
            debug!(error = %err, "no configuration found, using defaults for --db");
            Config::for_path(db.to_string_lossy())
        }),
        (None, None) => load()?,
    };

    if let Some(db) = &cli.db {
        config.database.path = db.to_string_lossy().into_owned();
    }
    config.inspector.read_only |= cli.read_only;
    config.inspector.multisite |= cli.multisite;

    config.validate()?;
    Ok(config)
}
