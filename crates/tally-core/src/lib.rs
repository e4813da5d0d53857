//! Tally Core Library
//!
//! Shared functionality for the Tally budget agent:
//! - Database access and migrations (SQLCipher-encrypted SQLite)
//! - Transaction, category, and budget rule storage
//! - Transaction aggregation
//! - Budget rule compliance evaluation
//! - Spending insights, projections, and health scoring
//! - Purchase advisor and allocation suggestions
//! - Tool implementations backing the MCP surface

pub mod advisor;
pub mod aggregate;
pub mod allocation;
pub mod compliance;
pub mod db;
pub mod error;
pub mod health;
pub mod insights;
pub mod models;
pub mod projection;
pub mod tools;

pub use advisor::{PurchaseVerdict, Recommendation};
pub use aggregate::{aggregate, AggregateSnapshot};
pub use allocation::{AllocationPlan, BudgetMethod};
pub use compliance::{ComplianceStatus, RuleVerdict};
pub use db::{Database, TransactionQuery};
pub use error::{Error, Result};
pub use health::{Grade, HealthScore};
pub use models::{
    BudgetCategory, BudgetRule, NewTransaction, RuleConfig, RuleKind, Transaction,
    TransactionKind,
};
pub use projection::{PaceStatus, SpendingProjection};
