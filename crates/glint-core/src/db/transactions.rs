//! Transaction operations

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::Transaction;

impl Database {
    /// A household's most recent transactions, date descending, capped at `limit`
    pub fn recent_transactions(
        &self,
        household_id: &str,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, household_id, date, title, category, type, amount
            FROM transactions
            WHERE household_id = ?
            ORDER BY date DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![household_id, limit as i64], |row| {
            Ok(Transaction {
                id: row.get(0)?,
                household_id: row.get(1)?,
                date: row.get(2)?,
                title: row.get(3)?,
                category: row.get(4)?,
                tx_type: row.get(5)?,
                amount: row.get(6)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Insert a transaction (dev/CLI only), returning its id
    pub fn insert_transaction(
        &self,
        household_id: &str,
        date: &str,
        title: &str,
        category: &str,
        tx_type: &str,
        amount: Option<f64>,
    ) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (household_id, date, title, category, type, amount)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![household_id, date, title, category, tx_type, amount],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Count transactions (for status output)
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }
}
