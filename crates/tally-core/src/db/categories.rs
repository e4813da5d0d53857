//! Budget category operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::BudgetCategory;

impl Database {
    /// Create a budget category for a user, returning the new id
    pub fn insert_category(&self, user_id: i64, name: &str, monthly_limit: f64) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO budget_categories (user_id, name, monthly_limit) VALUES (?, ?, ?)",
            params![user_id, name, monthly_limit],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's budget categories in creation order
    pub fn list_categories(&self, user_id: i64) -> Result<Vec<BudgetCategory>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, monthly_limit, created_at
             FROM budget_categories
             WHERE user_id = ?
             ORDER BY id",
        )?;

        let categories = stmt
            .query_map(params![user_id], |row| {
                let created_at_str: String = row.get(4)?;
                Ok(BudgetCategory {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    monthly_limit: row.get(3)?,
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Count total budget categories
    pub fn count_categories(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM budget_categories", [], |row| row.get(0))?;
        Ok(count)
    }
}
