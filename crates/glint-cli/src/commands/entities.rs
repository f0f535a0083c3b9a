//! Household, transaction and insight command implementations
//!
//! In production the surrounding expense-tracking application owns the
//! household and transaction data; `households add` and `tx add` exist for
//! local development and demos.

use anyhow::Result;
use glint_core::Database;

pub fn cmd_households_list(db: &Database) -> Result<()> {
    let households = db.list_households()?;

    if households.is_empty() {
        println!("No households found. Add one with:");
        println!("  glint households add my-home --monthly-limit 500");
        return Ok(());
    }

    println!();
    println!("🏠 Households");
    println!("   ─────────────────────────────");

    for household in households {
        println!(
            "   {} (monthly limit: {})",
            household.id, household.monthly_limit
        );
    }

    Ok(())
}

pub fn cmd_households_add(db: &Database, id: &str, monthly_limit: f64) -> Result<()> {
    db.upsert_household(id, monthly_limit)?;
    println!("✅ Household '{}' saved (monthly limit: {})", id, monthly_limit);
    Ok(())
}

pub fn cmd_tx_add(
    db: &Database,
    household: &str,
    date: &str,
    title: &str,
    category: &str,
    tx_type: &str,
    amount: Option<f64>,
) -> Result<()> {
    if db.get_household(household)?.is_none() {
        anyhow::bail!("Household '{}' not found. Add it first with 'glint households add'.", household);
    }

    let id = db.insert_transaction(household, date, title, category, tx_type, amount)?;
    println!("✅ Transaction {} added to '{}'", id, household);
    Ok(())
}

pub fn cmd_insights_list(db: &Database, household: &str, limit: usize) -> Result<()> {
    let insights = db.list_insights(household, limit)?;

    if insights.is_empty() {
        println!("No insights for '{}' yet. Run 'glint run' to generate some.", household);
        return Ok(());
    }

    println!();
    println!("💡 Insights for '{}'", household);
    println!("   ─────────────────────────────────────────────────────────────");

    for insight in insights {
        println!(
            "   [{}] {} ({})",
            insight.created_at.format("%Y-%m-%d %H:%M"),
            insight.text,
            insight.source
        );
    }

    Ok(())
}
