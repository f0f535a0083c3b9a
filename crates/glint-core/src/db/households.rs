//! Household operations

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::Result;
use crate::models::Household;

impl Database {
    /// List all households
    ///
    /// No defined order; the job attempts every household exactly once per
    /// run in whatever order this returns.
    pub fn list_households(&self) -> Result<Vec<Household>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare("SELECT id, monthly_limit FROM households")?;
        let rows = stmt.query_map([], |row| {
            Ok(Household {
                id: row.get(0)?,
                monthly_limit: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Get a single household by id
    pub fn get_household(&self, id: &str) -> Result<Option<Household>> {
        let conn = self.conn()?;

        let household = conn
            .query_row(
                "SELECT id, monthly_limit FROM households WHERE id = ?",
                params![id],
                |row| {
                    Ok(Household {
                        id: row.get(0)?,
                        monthly_limit: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(household)
    }

    /// Create or update a household (dev/CLI only)
    pub fn upsert_household(&self, id: &str, monthly_limit: f64) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO households (id, monthly_limit) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET monthly_limit = excluded.monthly_limit
            "#,
            params![id, monthly_limit],
        )?;

        Ok(())
    }

    /// Count households (for status output)
    pub fn count_households(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM households", [], |row| row.get(0))?;
        Ok(count)
    }
}
