//! Insight log operations
//!
//! The insight log is append-only: this crate never updates or deletes a
//! record once written. `created_at` is assigned by SQLite at write time.

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{Insight, NewInsight};

impl Database {
    /// Append an insight to a household's log, returning its id
    pub fn append_insight(&self, household_id: &str, insight: &NewInsight) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO insights (household_id, text, source) VALUES (?, ?, ?)",
            params![household_id, insight.text, insight.source],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a household's insights, newest first
    pub fn list_insights(&self, household_id: &str, limit: usize) -> Result<Vec<Insight>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, household_id, text, source, created_at
            FROM insights
            WHERE household_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![household_id, limit as i64], |row| {
            let created_at: String = row.get(4)?;
            Ok(Insight {
                id: row.get(0)?,
                household_id: row.get(1)?,
                text: row.get(2)?,
                source: row.get(3)?,
                created_at: parse_datetime(&created_at),
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Count insights for one household
    pub fn count_insights(&self, household_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM insights WHERE household_id = ?",
            params![household_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Count all insights (for status output)
    pub fn count_all_insights(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM insights", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewInsight, INSIGHT_SOURCE_SCHEDULED};

    #[test]
    fn test_append_and_list() {
        let db = Database::in_memory().unwrap();
        db.upsert_household("h1", 0.0).unwrap();

        let id = db
            .append_insight("h1", &NewInsight::scheduled("First summary".to_string()))
            .unwrap();
        assert!(id > 0);

        db.append_insight("h1", &NewInsight::scheduled("Second summary".to_string()))
            .unwrap();

        let insights = db.list_insights("h1", 10).unwrap();
        assert_eq!(insights.len(), 2);
        // Newest first
        assert_eq!(insights[0].text, "Second summary");
        assert_eq!(insights[0].source, INSIGHT_SOURCE_SCHEDULED);
    }

    #[test]
    fn test_empty_text_insight_is_valid() {
        let db = Database::in_memory().unwrap();
        db.upsert_household("h1", 0.0).unwrap();

        db.append_insight("h1", &NewInsight::scheduled(String::new()))
            .unwrap();

        let insights = db.list_insights("h1", 10).unwrap();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].text, "");
    }

    #[test]
    fn test_counts_are_per_household() {
        let db = Database::in_memory().unwrap();
        db.upsert_household("h1", 0.0).unwrap();
        db.upsert_household("h2", 0.0).unwrap();

        db.append_insight("h1", &NewInsight::scheduled("a".to_string()))
            .unwrap();
        db.append_insight("h1", &NewInsight::scheduled("b".to_string()))
            .unwrap();
        db.append_insight("h2", &NewInsight::scheduled("c".to_string()))
            .unwrap();

        assert_eq!(db.count_insights("h1").unwrap(), 2);
        assert_eq!(db.count_insights("h2").unwrap(), 1);
        assert_eq!(db.count_all_insights().unwrap(), 3);
    }
}
