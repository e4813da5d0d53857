//! User handle resolution

use rusqlite::params;
use tracing::debug;

use super::Database;
use crate::error::Result;

impl Database {
    /// Resolve a user handle to an id, creating the user on first use.
    ///
    /// Idempotent under concurrent calls for the same handle: the INSERT is
    /// OR IGNORE against the UNIQUE username constraint, so two racing
    /// resolvers both land on the same row.
    pub fn resolve_user(&self, username: &str) -> Result<i64> {
        let conn = self.conn()?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO users (username) VALUES (?)",
            params![username],
        )?;
        if inserted > 0 {
            debug!(username, "created user on first use");
        }

        let id: i64 = conn.query_row(
            "SELECT id FROM users WHERE username = ?",
            params![username],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    /// Count total users
    pub fn count_users(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}
