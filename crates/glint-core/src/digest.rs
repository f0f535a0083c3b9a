//! Household aggregation and prompt construction
//!
//! Turns a household's recent transaction history into the generation
//! prompt. The prompt layout is a hard external contract: field order and
//! the `date | title | category | type | amount` line format are the sole
//! steering mechanism for generation quality, so they must not drift.

use crate::models::{Household, Transaction};

/// How many recent transactions feed one prompt
///
/// Fewer (including zero) is valid for young or low-activity households.
pub const TRANSACTION_WINDOW: usize = 20;

/// Income and expense totals over a transaction window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DigestTotals {
    pub total_income: f64,
    pub total_expense: f64,
}

impl DigestTotals {
    /// Sum a transaction window into income and expense totals
    ///
    /// Only exactly-"income" rows count as income; every other type value
    /// counts as expense. Missing amounts coerce to 0 before summation.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut totals = Self::default();
        for tx in transactions {
            if tx.is_income() {
                totals.total_income += tx.amount_or_zero();
            } else {
                totals.total_expense += tx.amount_or_zero();
            }
        }
        totals
    }
}

/// Render one transaction as a prompt listing line
fn listing_line(tx: &Transaction) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        tx.date,
        tx.title,
        tx.category,
        tx.tx_type,
        tx.amount_or_zero()
    )
}

/// Build the generation prompt for one household
///
/// Transactions are rendered in the order given (the store returns them
/// descending by date); no re-sorting happens here.
pub fn build_prompt(household: &Household, transactions: &[Transaction]) -> String {
    let totals = DigestTotals::from_transactions(transactions);
    let lines = transactions
        .iter()
        .map(listing_line)
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        "You are a helpful financial assistant. Household monthlyLimit: {}\n",
        household.monthly_limit
    );
    prompt.push_str(&format!(
        "Total income: {}\nTotal expenses: {}\nRecent:\n{}",
        totals.total_income, totals.total_expense, lines
    ));
    prompt.push_str("\nProvide: 1) short summary; 2) 3 suggestions; 3) projection for next month.");
    prompt
}
