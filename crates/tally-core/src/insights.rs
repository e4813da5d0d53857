//! Spending insights
//!
//! Turns an [`AggregateSnapshot`] plus the user's category limits into an
//! ordered list of human-readable findings: savings-rate commentary first,
//! then per-category over-budget findings, then the top-spend highlight.

use crate::aggregate::AggregateSnapshot;
use crate::models::BudgetCategory;

/// Returned alone when there is nothing to say about the data
pub const NO_DATA_MESSAGE: &str = "No spending data available yet.";

/// Generate the ordered insight list.
///
/// Over-budget findings follow the given category order (creation order);
/// the top-spend highlight picks the largest per-category expense sum, with
/// ties resolved to the first category in the snapshot's iteration order.
/// When nothing at all can be said, a single no-data message is returned
/// instead of an empty list.
pub fn spending_insights(
    snapshot: &AggregateSnapshot,
    categories: &[BudgetCategory],
) -> Vec<String> {
    let mut insights = Vec::new();

    // Overall savings health
    if snapshot.total_income > 0.0 {
        let savings_rate =
            (snapshot.total_income - snapshot.total_expenses) / snapshot.total_income * 100.0;
        if savings_rate >= 20.0 {
            insights.push(format!("✅ Great savings rate of {:.1}%!", savings_rate));
        } else if savings_rate >= 10.0 {
            insights.push(format!(
                "⚠️ Savings rate is {:.1}%. Consider increasing to 20%.",
                savings_rate
            ));
        } else if savings_rate > 0.0 {
            insights.push(format!(
                "⚠️ Low savings rate of {:.1}%. Try to save more.",
                savings_rate
            ));
        } else {
            insights.push(format!(
                "❌ Negative savings rate ({:.1}%). Spending exceeds income!",
                savings_rate
            ));
        }
    } else if snapshot.total_expenses > 0.0 {
        insights.push("ℹ️ No income recorded yet.".to_string());
    }

    // Categories over their monthly limit
    for category in categories {
        let spent = snapshot.spent_in(&category.name);
        if spent > category.monthly_limit {
            insights.push(format!(
                "🚨 {} is ${:.2} over budget!",
                category.name,
                spent - category.monthly_limit
            ));
        }
    }

    // Highest spending category (ties go to the first in iteration order)
    let top = snapshot
        .expense_by_category
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal).then(
            // max_by keeps the later of equal elements; invert the key
            // tie-break so the earliest category wins
            b.0.cmp(a.0),
        ));
    if let Some((category, &spent)) = top {
        if spent > 0.0 {
            insights.push(format!("💰 Highest spending: {} (${:.2})", category, spent));
        }
    }

    if insights.is_empty() {
        insights.push(NO_DATA_MESSAGE.to_string());
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(income: f64, expenses: &[(&str, f64)]) -> AggregateSnapshot {
        let mut snap = AggregateSnapshot {
            total_income: income,
            ..Default::default()
        };
        for (category, amount) in expenses {
            snap.total_expenses += amount;
            *snap
                .expense_by_category
                .entry(category.to_string())
                .or_insert(0.0) += amount;
        }
        snap
    }

    fn category(name: &str, limit: f64) -> BudgetCategory {
        BudgetCategory {
            id: 0,
            user_id: 1,
            name: name.to_string(),
            monthly_limit: limit,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_great_savings_rate_comes_first() {
        let snap = snapshot(1000.0, &[("Food", 700.0)]);
        let insights = spending_insights(&snap, &[]);
        assert!(insights[0].contains("Great savings rate of 30.0%"));
    }

    #[test]
    fn test_savings_rate_tiers() {
        let mild = spending_insights(&snapshot(1000.0, &[("Food", 850.0)]), &[]);
        assert!(mild[0].contains("Savings rate is 15.0%"));

        let low = spending_insights(&snapshot(1000.0, &[("Food", 950.0)]), &[]);
        assert!(low[0].contains("Low savings rate of 5.0%"));

        let negative = spending_insights(&snapshot(1000.0, &[("Food", 1200.0)]), &[]);
        assert!(negative[0].contains("Negative savings rate (-20.0%)"));
    }

    #[test]
    fn test_no_income_insight() {
        let snap = snapshot(0.0, &[("Food", 100.0)]);
        let insights = spending_insights(&snap, &[]);
        assert_eq!(insights[0], "ℹ️ No income recorded yet.");
    }

    #[test]
    fn test_over_budget_findings_in_category_order() {
        let snap = snapshot(0.0, &[("Food", 250.0), ("Transport", 90.0)]);
        let categories = vec![category("Transport", 50.0), category("Food", 200.0)];
        let insights = spending_insights(&snap, &categories);

        // no-income note, then overages in category creation order
        assert!(insights[1].contains("Transport is $40.00 over budget"));
        assert!(insights[2].contains("Food is $50.00 over budget"));
    }

    #[test]
    fn test_within_budget_produces_no_overage_finding() {
        let snap = snapshot(1000.0, &[("Food", 100.0)]);
        let insights = spending_insights(&snap, &[category("Food", 200.0)]);
        assert!(!insights.iter().any(|i| i.contains("over budget")));
    }

    #[test]
    fn test_top_spending_category_is_last() {
        let snap = snapshot(1000.0, &[("Food", 300.0), ("Rent", 500.0)]);
        let insights = spending_insights(&snap, &[]);
        assert!(insights.last().unwrap().contains("Highest spending: Rent ($500.00)"));
    }

    #[test]
    fn test_top_spending_tie_goes_to_first_category() {
        let snap = snapshot(1000.0, &[("Food", 200.0), ("Rent", 200.0)]);
        let insights = spending_insights(&snap, &[]);
        assert!(insights.last().unwrap().contains("Highest spending: Food"));
    }

    #[test]
    fn test_no_data_fallback() {
        let insights = spending_insights(&AggregateSnapshot::default(), &[]);
        assert_eq!(insights, vec!["No spending data available yet."]);
    }
}
