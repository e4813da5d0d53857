//! Budget rule operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{BudgetRule, RuleKind};

impl Database {
    /// Create a budget rule for a user, returning the new id
    ///
    /// Rules are created active. The config string should already have been
    /// validated against [`crate::models::RuleConfig`] at the boundary.
    pub fn insert_rule(
        &self,
        user_id: i64,
        kind: RuleKind,
        name: &str,
        config: &str,
    ) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO budget_rules (user_id, kind, name, config) VALUES (?, ?, ?, ?)",
            params![user_id, kind.as_str(), name, config],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's active budget rules in creation order
    pub fn list_active_rules(&self, user_id: i64) -> Result<Vec<BudgetRule>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, kind, name, config, is_active, created_at
             FROM budget_rules
             WHERE user_id = ? AND is_active = 1
             ORDER BY id",
        )?;

        let rules = stmt
            .query_map(params![user_id], |row| Self::row_to_rule(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rules)
    }

    /// Delete a budget rule owned by the user (hard delete, no soft-delete)
    ///
    /// Returns false when nothing matched (missing id or wrong owner).
    pub fn delete_rule(&self, id: i64, user_id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM budget_rules WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    /// Column order: id, user_id, kind, name, config, is_active, created_at
    fn row_to_rule(row: &rusqlite::Row) -> rusqlite::Result<BudgetRule> {
        let kind_str: String = row.get(2)?;
        let is_active_int: i64 = row.get(5)?;
        let created_at_str: String = row.get(6)?;
        Ok(BudgetRule {
            id: row.get(0)?,
            user_id: row.get(1)?,
            // Stored kinds are written through RuleKind::as_str, so an
            // unknown value here means hand-edited data; fall back to the
            // most inert kind rather than failing the whole listing
            kind: kind_str.parse().unwrap_or(RuleKind::SpendingAlert),
            name: row.get(3)?,
            config: row.get(4)?,
            is_active: is_active_int != 0,
            created_at: parse_datetime(&created_at_str),
        })
    }

    /// Count total budget rules (active and inactive)
    pub fn count_rules(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM budget_rules", [], |row| row.get(0))?;
        Ok(count)
    }
}
