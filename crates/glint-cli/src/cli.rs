//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Glint - Scheduled financial insights for every household
#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Daily AI-generated spending insights per household", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "glint.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Run the insight job once over all households
    ///
    /// This is the unit of work an external scheduler (cron, systemd timer)
    /// should invoke. Credentials come from GEMINI_API_KEY / OPENAI_API_KEY.
    Run,

    /// Run the insight job on a fixed interval, in the foreground
    Schedule {
        /// Hours between runs
        ///
        /// The GLINT_SCHEDULE environment variable overrides this flag.
        #[arg(long, default_value = "24")]
        every_hours: u64,
    },

    /// Show database and provider status
    Status,

    /// Manage households (list, add)
    Households {
        #[command(subcommand)]
        action: Option<HouseholdsAction>,
    },

    /// Manage transactions
    Tx {
        #[command(subcommand)]
        action: TxAction,
    },

    /// List generated insights
    Insights {
        /// Household to list insights for
        household: String,

        /// Maximum number of insights to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum HouseholdsAction {
    /// List all households
    List,

    /// Add or update a household
    Add {
        /// Household identifier
        id: String,

        /// Monthly spending limit
        #[arg(long, default_value = "0")]
        monthly_limit: f64,
    },
}

#[derive(Subcommand)]
pub enum TxAction {
    /// Add a transaction to a household
    Add {
        /// Household identifier
        household: String,

        /// Transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Transaction title
        #[arg(long)]
        title: String,

        /// Category label
        #[arg(long, default_value = "")]
        category: String,

        /// Transaction type: income or expense
        #[arg(long = "type", default_value = "expense")]
        tx_type: String,

        /// Amount
        #[arg(long)]
        amount: Option<f64>,
    },
}
