//! Glint Core Library
//!
//! Shared functionality for the glint household insight generator:
//! - SQLite datastore adapter and migrations
//! - Pluggable text-generation providers (Gemini, OpenAI)
//! - Household aggregation and prompt construction
//! - Daily batch job with per-household failure isolation

pub mod ai;
pub mod config;
pub mod db;
pub mod digest;
pub mod error;
pub mod job;
pub mod models;
pub mod store;

/// Test utilities including a mock provider server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{GeminiBackend, GenClient, MockBackend, OpenAiBackend, TextGenerator};
pub use config::ProviderConfig;
pub use db::Database;
pub use digest::{build_prompt, DigestTotals, TRANSACTION_WINDOW};
pub use error::{Error, Result};
pub use job::{run_daily_job, HouseholdOutcome, InsightJob, JobReport};
pub use models::{
    Household, Insight, NewInsight, Transaction, INSIGHT_SOURCE_SCHEDULED,
};
pub use store::LedgerStore;
