//! Datastore seam for the insight job
//!
//! The orchestrator only needs three operations from the datastore, so they
//! live behind a trait: it keeps each household's processing an independent
//! unit of work, and tests can substitute stores that fail mid-batch to
//! exercise the isolation guarantees.

use crate::error::Result;
use crate::models::{Household, NewInsight, Transaction};

/// Read/append operations the insight job performs against the datastore
///
/// Households and transactions are read-only from this crate's perspective;
/// insights are append-only and each household owns its own log, so no
/// coordination is required between households.
pub trait LedgerStore: Send + Sync {
    /// List all households (no defined order)
    fn list_households(&self) -> Result<Vec<Household>>;

    /// A household's most recent transactions, ordered by date descending,
    /// capped at `limit`
    fn recent_transactions(&self, household_id: &str, limit: usize) -> Result<Vec<Transaction>>;

    /// Append an insight to a household's log, returning its id
    ///
    /// The creation timestamp is assigned by the store at write time.
    fn append_insight(&self, household_id: &str, insight: &NewInsight) -> Result<i64>;
}
