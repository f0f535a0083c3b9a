//! Glint CLI - Scheduled household insight generator
//!
//! Usage:
//!   glint init                Initialize database
//!   glint run                 Run the insight job once (cron entry point)
//!   glint schedule            Run the job on a fixed interval
//!   glint status              Show database and provider status

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
        Commands::Run => commands::cmd_run(&cli.db).await,
        Commands::Schedule { every_hours } => commands::cmd_schedule(&cli.db, every_hours).await,
        Commands::Status => commands::cmd_status(&cli.db).await,
        Commands::Households { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(HouseholdsAction::List) => commands::cmd_households_list(&db),
                Some(HouseholdsAction::Add { id, monthly_limit }) => {
                    commands::cmd_households_add(&db, &id, monthly_limit)
                }
            }
        }
        Commands::Tx { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                TxAction::Add {
                    household,
                    date,
                    title,
                    category,
                    tx_type,
                    amount,
                } => commands::cmd_tx_add(&db, &household, &date, &title, &category, &tx_type, amount),
            }
        }
        Commands::Insights { household, limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_insights_list(&db, &household, limit)
        }
    }
}
