//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_run` - Run the insight job once (the cron entry point)

use std::path::Path;

use anyhow::{Context, Result};
use glint_core::{run_daily_job, Database, ProviderConfig};

/// Open the database, creating the schema if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a household: glint households add my-home --monthly-limit 500");
    println!("  2. Set GEMINI_API_KEY (or OPENAI_API_KEY) and run: glint run");

    Ok(())
}

pub async fn cmd_run(db_path: &Path) -> Result<()> {
    let db = open_db(db_path)?;
    let config = ProviderConfig::from_env();

    if !config.any_configured() {
        println!("💡 No provider configured. Set GEMINI_API_KEY or OPENAI_API_KEY.");
        return Ok(());
    }

    println!("🔍 Running insight job...");

    let report = run_daily_job(&db, &config).await?;

    if let Some(report) = report {
        println!();
        println!("📊 Job Results");
        println!("   ─────────────────────────────");
        println!("   Households processed: {}", report.outcomes.len());
        println!("   ✅ Insights stored: {}", report.succeeded());
        if report.failed() > 0 {
            println!("   ⚠️  Failures: {}", report.failed());
            for outcome in &report.outcomes {
                if let Err(e) = &outcome.result {
                    println!("      {} - {}", outcome.household_id, e);
                }
            }
        }
    }

    Ok(())
}
