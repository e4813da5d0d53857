//! Transaction aggregation
//!
//! Reduces a user's raw transaction history into the totals every other
//! analysis component consumes. Recomputed fresh on each evaluation from the
//! full transaction set; there is no incremental maintenance or caching.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Transaction, TransactionKind};

/// Reduced totals for one user's transaction set
///
/// Amounts are accumulated without rounding; rounding to 2 decimal places
/// happens only at presentation time in downstream components. Category keys
/// are the raw transaction category strings, matched case-sensitively.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateSnapshot {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Expense sum per category, iterated in sorted (BTreeMap) order
    pub expense_by_category: BTreeMap<String, f64>,
}

impl AggregateSnapshot {
    /// Net amount saved (income minus expenses)
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    /// Expense sum for a category, 0 when the category never occurred
    pub fn spent_in(&self, category: &str) -> f64 {
        self.expense_by_category.get(category).copied().unwrap_or(0.0)
    }
}

/// Reduce a transaction set to an [`AggregateSnapshot`]
///
/// Single pass; input order does not matter. Empty input yields the all-zero
/// snapshot. Invariant: `total_expenses` equals the sum of the per-category
/// expense values.
pub fn aggregate(transactions: &[Transaction]) -> AggregateSnapshot {
    let mut snapshot = AggregateSnapshot::default();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => snapshot.total_income += tx.amount,
            TransactionKind::Expense => {
                snapshot.total_expenses += tx.amount;
                *snapshot
                    .expense_by_category
                    .entry(tx.category.clone())
                    .or_insert(0.0) += tx.amount;
            }
        }
    }

    snapshot
}
