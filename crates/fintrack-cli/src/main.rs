//! Fintrack CLI - Personal finance tracker
//!
//! Usage:
//!   fintrack init                              Initialize database
//!   fintrack add --kind expense \
//!       --category food --amount 12.50        Record a transaction
//!   fintrack summary                           Income/expense summary
//!   fintrack serve --port 3000                 Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            kind,
            category,
            amount,
            description,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(
                &db,
                &cli.owner,
                &kind,
                &category,
                amount,
                description.as_deref(),
                date.as_deref(),
            )
        }
        Commands::List { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, &cli.owner, limit)
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete(&db, &cli.owner, id)
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                BudgetAction::Set {
                    category,
                    amount,
                    month,
                    year,
                } => commands::cmd_budget_set(&db, &cli.owner, &category, amount, month, year),
                BudgetAction::List { month, year } => {
                    commands::cmd_budget_list(&db, &cli.owner, month, year)
                }
            }
        }
        Commands::Summary { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_summary(&db, &cli.owner, limit)
        }
        Commands::Trends => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_trends(&db, &cli.owner)
        }
        Commands::Performance { month, year } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_performance(&db, &cli.owner, month, year)
        }
        Commands::Advice { context, limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_advice(&db, &cli.owner, context.as_deref(), limit).await
        }
        Commands::Status => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_status(&db, &cli.owner)
        }
        Commands::Serve {
            port,
            host,
            allow_origins,
        } => commands::cmd_serve(&cli.db, &host, port, allow_origins).await,
    }
}
