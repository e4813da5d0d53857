//! Budget allocation suggestions and the budget-method catalog
//!
//! Pure calculations; no storage access.

use serde::Serialize;

use crate::error::{Error, Result};

/// One slice of an allocation plan
#[derive(Debug, Clone, Serialize)]
pub struct AllocationBucket {
    pub name: &'static str,
    pub percent: f64,
    pub amount: f64,
}

/// Income distributed across named buckets per a budgeting method
#[derive(Debug, Clone, Serialize)]
pub struct AllocationPlan {
    pub monthly_income: f64,
    pub method: String,
    pub allocations: Vec<AllocationBucket>,
}

/// Distribute monthly income across buckets for a named method.
///
/// Supported methods: `50/30/20`, `80/20`, and `pay_yourself_first`
/// (25% savings). Anything else is a handled input error.
pub fn suggest_allocation(monthly_income: f64, method: &str) -> Result<AllocationPlan> {
    let allocations = match method {
        "50/30/20" => vec![
            bucket("needs", 50.0, monthly_income),
            bucket("wants", 30.0, monthly_income),
            bucket("savings", 20.0, monthly_income),
        ],
        "80/20" => vec![
            bucket("spending", 80.0, monthly_income),
            bucket("savings", 20.0, monthly_income),
        ],
        // Default to 25% savings for pay yourself first
        "pay_yourself_first" => vec![
            bucket("savings", 25.0, monthly_income),
            bucket("remainder", 75.0, monthly_income),
        ],
        _ => {
            return Err(Error::InvalidData(format!(
                "Unknown method: {}. Try '50/30/20', '80/20', or 'pay_yourself_first'.",
                method
            )))
        }
    };

    Ok(AllocationPlan {
        monthly_income,
        method: method.to_string(),
        allocations,
    })
}

fn bucket(name: &'static str, percent: f64, income: f64) -> AllocationBucket {
    AllocationBucket {
        name,
        percent,
        amount: income * percent / 100.0,
    }
}

/// A popular budgeting method, for guiding users during onboarding
#[derive(Debug, Clone, Serialize)]
pub struct BudgetMethod {
    pub name: &'static str,
    pub description: &'static str,
    pub best_for: &'static str,
    pub config_template: &'static str,
}

/// The catalog of popular budget methods with descriptions
pub fn budget_methods() -> Vec<BudgetMethod> {
    vec![
        BudgetMethod {
            name: "50/30/20 Rule",
            description: "Allocate 50% of income to needs (rent, groceries, utilities), 30% to wants (entertainment, dining out), and 20% to savings and debt repayment.",
            best_for: "Beginners who want a simple framework.",
            config_template: r#"{"needs": 50, "wants": 30, "savings": 20}"#,
        },
        BudgetMethod {
            name: "Zero-Based Budgeting",
            description: "Assign every dollar a specific purpose until income minus expenses equals zero. Every dollar has a job.",
            best_for: "Detail-oriented planners who want full control.",
            config_template: r#"{"method": "zero_based"}"#,
        },
        BudgetMethod {
            name: "Envelope System",
            description: "Allocate cash to category 'envelopes'. When an envelope is empty, no more spending in that category.",
            best_for: "People who struggle with overspending in specific categories.",
            config_template: r#"{"categories": ["Groceries", "Entertainment", "Dining Out"]}"#,
        },
        BudgetMethod {
            name: "Pay Yourself First",
            description: "Automatically save a fixed percentage of income before spending on anything else.",
            best_for: "Those prioritizing savings and wealth building.",
            config_template: r#"{"savings_percent": 20}"#,
        },
        BudgetMethod {
            name: "80/20 Rule",
            description: "Save 20% of income, spend 80% however you want. Simple and flexible.",
            best_for: "People who want minimal budgeting effort.",
            config_template: r#"{"savings": 20, "spending": 80}"#,
        },
        BudgetMethod {
            name: "Values-Based Budgeting",
            description: "Prioritize spending on what matters most to you. Cut ruthlessly elsewhere.",
            best_for: "Those who want alignment between money and values.",
            config_template: r#"{"priorities": ["Health", "Education", "Experiences"]}"#,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifty_thirty_twenty() {
        let plan = suggest_allocation(3000.0, "50/30/20").unwrap();
        assert_eq!(plan.allocations.len(), 3);
        assert_eq!(plan.allocations[0].name, "needs");
        assert_eq!(plan.allocations[0].amount, 1500.0);
        assert_eq!(plan.allocations[1].amount, 900.0);
        assert_eq!(plan.allocations[2].amount, 600.0);
    }

    #[test]
    fn test_eighty_twenty() {
        let plan = suggest_allocation(1000.0, "80/20").unwrap();
        assert_eq!(plan.allocations[0].name, "spending");
        assert_eq!(plan.allocations[0].amount, 800.0);
        assert_eq!(plan.allocations[1].name, "savings");
        assert_eq!(plan.allocations[1].amount, 200.0);
    }

    #[test]
    fn test_pay_yourself_first() {
        let plan = suggest_allocation(2000.0, "pay_yourself_first").unwrap();
        assert_eq!(plan.allocations[0].name, "savings");
        assert_eq!(plan.allocations[0].amount, 500.0);
        assert_eq!(plan.allocations[1].amount, 1500.0);
    }

    #[test]
    fn test_unknown_method_is_handled_error() {
        let result = suggest_allocation(1000.0, "envelope");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Unknown method: envelope"));
    }

    #[test]
    fn test_buckets_cover_full_income() {
        for method in ["50/30/20", "80/20", "pay_yourself_first"] {
            let plan = suggest_allocation(1234.56, method).unwrap();
            let total: f64 = plan.allocations.iter().map(|b| b.amount).sum();
            assert!((total - 1234.56).abs() < 1e-9, "method {}", method);
        }
    }

    #[test]
    fn test_budget_methods_catalog() {
        let methods = budget_methods();
        assert_eq!(methods.len(), 6);
        assert_eq!(methods[0].name, "50/30/20 Rule");
        assert!(methods.iter().all(|m| !m.description.is_empty()));
    }
}
