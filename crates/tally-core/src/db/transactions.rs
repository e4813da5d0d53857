//! Transaction operations

use rusqlite::params;

use super::{format_datetime, parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewTransaction, Transaction, TransactionKind};

/// Optional filters for listing a user's transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Exact category match (case-sensitive, like the rest of the system)
    pub category: Option<String>,
    /// Filter by income/expense
    pub kind: Option<TransactionKind>,
    /// Maximum number of rows; `None` returns the full history
    pub limit: Option<i64>,
}

impl Database {
    /// Insert a transaction for a user, returning the new id
    pub fn insert_transaction(&self, user_id: i64, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, amount, description, category, kind, occurred_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.amount,
                tx.description,
                tx.category,
                tx.kind.as_str(),
                format_datetime(tx.occurred_at),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Delete a transaction owned by the user
    ///
    /// Filters by both id and owner, so a caller can never delete another
    /// user's row. Returns false when nothing matched (missing id or wrong
    /// owner - indistinguishable by design).
    pub fn delete_transaction(&self, id: i64, user_id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    /// List a user's transactions with optional filters, most recent first
    pub fn list_transactions(
        &self,
        user_id: i64,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        // Build dynamic WHERE clause
        let mut conditions = vec!["user_id = ?".to_string()];
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

        if let Some(ref category) = query.category {
            conditions.push("category = ?".to_string());
            sql_params.push(Box::new(category.clone()));
        }

        if let Some(kind) = query.kind {
            conditions.push("kind = ?".to_string());
            sql_params.push(Box::new(kind.as_str().to_string()));
        }

        let mut sql = format!(
            "SELECT id, user_id, amount, description, category, kind, occurred_at, created_at
             FROM transactions
             WHERE {}
             ORDER BY occurred_at DESC, id DESC",
            conditions.join(" AND ")
        );

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            sql_params.push(Box::new(limit));
        }

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            sql_params.iter().map(|p| p.as_ref()).collect();

        let transactions = stmt
            .query_map(params_refs.as_slice(), |row| Self::row_to_transaction(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Helper to convert a row to Transaction
    /// Column order: id, user_id, amount, description, category, kind, occurred_at, created_at
    fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let kind_str: String = row.get(5)?;
        let occurred_at_str: String = row.get(6)?;
        let created_at_str: String = row.get(7)?;
        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            kind: kind_str.parse().unwrap_or_default(),
            occurred_at: parse_datetime(&occurred_at_str),
            created_at: parse_datetime(&created_at_str),
        })
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }
}
