//! SQLite datastore adapter with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `households` - Household reads plus dev-only upserts
//! - `transactions` - Transaction reads plus dev-only inserts
//! - `insights` - Append-only insight log
//!
//! In production the surrounding expense-tracking application owns the
//! household and transaction data; the write paths here exist for the CLI's
//! local-development commands and for tests.

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;
use crate::models::{Household, NewInsight, Transaction};
use crate::store::LedgerStore;

mod households;
mod insights;
mod transactions;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Create a new database connection pool and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create an in-memory database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because each
    /// pooled connection to `:memory:` would see its own separate database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!("/tmp/glint_test_{}_{}.db", std::process::id(), id);

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- WAL mode: better concurrency, readers don't block writers
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Households (tenants), owned by the account-management system
            CREATE TABLE IF NOT EXISTS households (
                id TEXT PRIMARY KEY,
                monthly_limit REAL NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Transactions, owned by the expense-tracking application
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                household_id TEXT NOT NULL REFERENCES households(id),
                date TEXT NOT NULL,
                title TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                type TEXT NOT NULL DEFAULT 'expense',
                amount REAL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_household_date
                ON transactions(household_id, date DESC);

            -- Insights (append-only per-household log of generated text)
            CREATE TABLE IF NOT EXISTS insights (
                id INTEGER PRIMARY KEY,
                household_id TEXT NOT NULL REFERENCES households(id),
                text TEXT NOT NULL,
                source TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_insights_household
                ON insights(household_id, created_at DESC);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

// The job sees the database only through the LedgerStore seam.
impl LedgerStore for Database {
    fn list_households(&self) -> Result<Vec<Household>> {
        Database::list_households(self)
    }

    fn recent_transactions(&self, household_id: &str, limit: usize) -> Result<Vec<Transaction>> {
        Database::recent_transactions(self, household_id, limit)
    }

    fn append_insight(&self, household_id: &str, insight: &NewInsight) -> Result<i64> {
        Database::append_insight(self, household_id, insight)
    }
}
