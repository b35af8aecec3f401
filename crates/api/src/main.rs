//! dbsweep - database bloat inspector
//!
//! Main entry point for the command-line application.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dbsweep_lib::utils::logging::{init_tracing, json_requested};
use dbsweep_lib::utils::render;
use dbsweep_lib::{commands, resolve_config, AppContext, Cli, Commands};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load .env before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    init_tracing(cli.verbose, json_requested());
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env file loaded"),
    }

    let config = resolve_config(&cli).context("failed to load configuration")?;
    let ctx = AppContext::new(config).context("failed to initialise application context")?;
    ctx.health_check().context("database health check failed")?;

    run(&ctx, cli.command).await
}

async fn run(ctx: &AppContext, command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Stats { json } => {
            let report = commands::get_database_stats(ctx).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render::stats_table(&report));
                println!("{}", render::penalties_table(&report));
                if !report.stats.top_autoload.is_empty() {
                    println!("{}", render::autoload_table(&report.stats.top_autoload));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Clean { action } => {
            let result = commands::run_cleanup(ctx, &action).await;
            println!("{}", render::cleanup_line(&action, &result));
            Ok(if result.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Actions => {
            let actions = commands::list_actions(ctx).await;
            println!("{}", render::actions_table(&actions));
            Ok(ExitCode::SUCCESS)
        }
        Commands::ReadOnly => {
            let read_only = commands::get_read_only(ctx);
            println!("read-only: {}", if read_only { "enabled" } else { "disabled" });
            Ok(ExitCode::SUCCESS)
        }
        Commands::InitSchema => {
            commands::init_schema(ctx).context("failed to install schema")?;
            println!("schema ready (prefix '{}')", ctx.tables.prefix());
            Ok(ExitCode::SUCCESS)
        }
    }
}
