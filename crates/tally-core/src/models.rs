//! Domain models for Tally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A recorded financial transaction, owned by exactly one user.
///
/// Immutable once created except for deletion by its owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    pub occurred_at: DateTime<Utc>,
}

/// Whether a transaction adds to income or expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Invalid transaction type '{}'. Must be 'expense' or 'income'.",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending category with a monthly limit
///
/// Name uniqueness per user is deliberately not enforced, and category names
/// are matched case-sensitively against transaction categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub monthly_limit: f64,
    pub created_at: DateTime<Utc>,
}

/// A stored, user-defined budget policy
///
/// `config` holds the raw JSON payload the caller supplied at creation time.
/// It is validated against [`RuleConfig`] at the creation boundary, and
/// re-parsed at evaluation time (unparseable stored configs degrade to an
/// indeterminate verdict rather than failing the whole report).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRule {
    pub id: i64,
    pub user_id: i64,
    pub kind: RuleKind,
    pub name: String,
    pub config: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Budget rule kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    PercentageAllocation,
    CategoryLimit,
    SavingsGoal,
    SpendingAlert,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PercentageAllocation => "percentage_allocation",
            Self::CategoryLimit => "category_limit",
            Self::SavingsGoal => "savings_goal",
            Self::SpendingAlert => "spending_alert",
        }
    }

    /// All kinds, for error messages listing valid values
    pub fn all() -> [RuleKind; 4] {
        [
            Self::PercentageAllocation,
            Self::CategoryLimit,
            Self::SavingsGoal,
            Self::SpendingAlert,
        ]
    }
}

impl std::str::FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage_allocation" => Ok(Self::PercentageAllocation),
            "category_limit" => Ok(Self::CategoryLimit),
            "savings_goal" => Ok(Self::SavingsGoal),
            "spending_alert" => Ok(Self::SpendingAlert),
            _ => {
                let valid = Self::all()
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(format!(
                    "Invalid rule type '{}'. Must be one of: {}",
                    s, valid
                ))
            }
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed, kind-specific rule configuration
///
/// One variant per rule kind, each carrying only its required fields, so
/// missing-field handling is exhaustive instead of scattered over an
/// untyped map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleConfig {
    /// Target savings percent of income (e.g. the "20" in 50/30/20)
    PercentageAllocation { savings: f64 },
    /// Spending cap for a named category
    CategoryLimit { category: String, limit: f64 },
    /// Absolute amount to keep saved (income minus expenses)
    SavingsGoal { goal: f64 },
    /// One-sided trigger when category spend reaches a threshold
    SpendingAlert { category: String, threshold: f64 },
}

impl RuleConfig {
    /// Parse a caller-supplied JSON config string for the given rule kind.
    ///
    /// Extra fields are ignored (a 50/30/20 config may carry "needs" and
    /// "wants" alongside "savings"); missing required fields are an error.
    pub fn parse(kind: RuleKind, config: &str) -> Result<RuleConfig> {
        let invalid = |msg: String| {
            Error::InvalidData(format!(
                "config for {} rule is invalid: {}",
                kind.as_str(),
                msg
            ))
        };

        match kind {
            RuleKind::PercentageAllocation => {
                #[derive(Deserialize)]
                struct Cfg {
                    savings: f64,
                }
                let cfg: Cfg =
                    serde_json::from_str(config).map_err(|e| invalid(e.to_string()))?;
                Ok(RuleConfig::PercentageAllocation {
                    savings: cfg.savings,
                })
            }
            RuleKind::CategoryLimit => {
                #[derive(Deserialize)]
                struct Cfg {
                    category: String,
                    limit: f64,
                }
                let cfg: Cfg =
                    serde_json::from_str(config).map_err(|e| invalid(e.to_string()))?;
                Ok(RuleConfig::CategoryLimit {
                    category: cfg.category,
                    limit: cfg.limit,
                })
            }
            RuleKind::SavingsGoal => {
                #[derive(Deserialize)]
                struct Cfg {
                    goal: f64,
                }
                let cfg: Cfg =
                    serde_json::from_str(config).map_err(|e| invalid(e.to_string()))?;
                Ok(RuleConfig::SavingsGoal { goal: cfg.goal })
            }
            RuleKind::SpendingAlert => {
                #[derive(Deserialize)]
                struct Cfg {
                    category: String,
                    threshold: f64,
                }
                let cfg: Cfg =
                    serde_json::from_str(config).map_err(|e| invalid(e.to_string()))?;
                Ok(RuleConfig::SpendingAlert {
                    category: cfg.category,
                    threshold: cfg.threshold,
                })
            }
        }
    }
}
