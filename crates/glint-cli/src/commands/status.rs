//! Status command implementation

use std::path::Path;

use anyhow::Result;
use glint_core::{GenClient, ProviderConfig, TextGenerator};

use super::open_db;

pub async fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Glint Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    // Provider configuration and reachability
    let config = ProviderConfig::from_env();
    match GenClient::from_config(&config) {
        Some(client) => {
            let reachable = if client.health_check().await {
                "reachable"
            } else {
                "unreachable"
            };
            println!("   🤖 Provider: {} ({})", client.model(), reachable);
        }
        None => {
            println!("   ❌ Provider: none configured");
            println!("      Set GEMINI_API_KEY or OPENAI_API_KEY");
        }
    }

    // Try to open the database and show counts
    if db_path.exists() {
        match open_db(db_path) {
            Ok(db) => {
                println!();
                println!("   Households: {}", db.count_households()?);
                println!("   Transactions: {}", db.count_transactions()?);
                println!("   Insights: {}", db.count_all_insights()?);
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
            }
        }
    }

    println!();
    Ok(())
}
