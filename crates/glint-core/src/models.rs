//! Core data models
//!
//! Households and their transactions are owned by the surrounding
//! expense-tracking application; this crate only reads them. Insights are
//! the one thing glint writes, and only ever appends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source tag for insights written by the scheduled job.
///
/// Distinguishes scheduled generations from user-triggered ones in the
/// insight log.
pub const INSIGHT_SOURCE_SCHEDULED: &str = "scheduled";

/// A household (tenant) in the multi-tenant finance application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    /// Opaque identifier assigned by the account-management system
    pub id: String,
    /// Configured monthly spending limit; 0 when the household never set one
    pub monthly_limit: f64,
}

/// A single transaction belonging to one household
///
/// Immutable once created. `tx_type` and `category` are free text from the
/// source application and are rendered verbatim into prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub household_id: String,
    /// Sortable date string (ISO-like, as stored by the source application)
    pub date: String,
    pub title: String,
    pub category: String,
    /// Transaction type as recorded; only exactly "income" counts as income
    pub tx_type: String,
    /// Amount; absent in some legacy rows and coerced to 0 before summation
    pub amount: Option<f64>,
}

impl Transaction {
    /// Whether this transaction counts toward income totals.
    ///
    /// Any value other than exactly "income" (including unrecognized ones)
    /// counts as an expense.
    pub fn is_income(&self) -> bool {
        self.tx_type == "income"
    }

    /// Amount with missing values coerced to 0
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// A generated insight appended to a household's log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: i64,
    pub household_id: String,
    /// Generated text; may be empty when the provider response could not
    /// be parsed
    pub text: String,
    /// Provenance tag ("scheduled" for job-generated insights)
    pub source: String,
    /// Assigned by the store at write time
    pub created_at: DateTime<Utc>,
}

/// A new insight ready to be appended
#[derive(Debug, Clone)]
pub struct NewInsight {
    pub text: String,
    pub source: String,
}

impl NewInsight {
    /// Create a scheduled-job insight
    pub fn scheduled(text: String) -> Self {
        Self {
            text,
            source: INSIGHT_SOURCE_SCHEDULED.to_string(),
        }
    }
}
