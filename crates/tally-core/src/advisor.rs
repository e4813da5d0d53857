//! Purchase advisor
//!
//! Pure, stateless evaluation of a single hypothetical purchase against a
//! remaining budget. No storage access; the caller supplies the numbers.

use serde::Serialize;

/// Verdict on a proposed purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Approve,
    Deny,
    Caution,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "APPROVE",
            Self::Deny => "DENY",
            Self::Caution => "CAUTION",
        }
    }
}

/// Full purchase evaluation record, suitable for direct JSON presentation
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseVerdict {
    pub category: String,
    pub budget_limit: f64,
    pub already_spent: f64,
    pub remaining_before: f64,
    pub purchase_amount: f64,
    pub remaining_after: f64,
    pub recommendation: Recommendation,
    pub reason: String,
}

/// Evaluate a proposed purchase against a category budget.
///
/// First match wins: a purchase larger than what remains is denied; one that
/// would leave less than 10% of the limit gets a caution; anything else is
/// approved. Nothing is clamped - a negative `remaining_before` (already over
/// budget) flows through the same comparisons.
pub fn check_purchase(
    budget_limit: f64,
    amount_spent: f64,
    purchase_amount: f64,
    category: &str,
) -> PurchaseVerdict {
    let remaining_before = budget_limit - amount_spent;
    let remaining_after = remaining_before - purchase_amount;

    let (recommendation, reason) = if purchase_amount > remaining_before {
        (
            Recommendation::Deny,
            format!(
                "This purchase of ${:.2} would exceed your {} budget by ${:.2}.",
                purchase_amount,
                category,
                remaining_after.abs()
            ),
        )
    } else if remaining_after < budget_limit * 0.1 {
        (
            Recommendation::Caution,
            format!(
                "This purchase is within budget, but would leave only ${:.2} ({:.1}%) remaining.",
                remaining_after,
                (remaining_after / budget_limit) * 100.0
            ),
        )
    } else {
        (
            Recommendation::Approve,
            format!(
                "This purchase is within budget. You'll have ${:.2} remaining.",
                remaining_after
            ),
        )
    };

    PurchaseVerdict {
        category: category.to_string(),
        budget_limit,
        already_spent: amount_spent,
        remaining_before,
        purchase_amount,
        remaining_after,
        recommendation,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_when_purchase_exceeds_remaining() {
        // 10 remaining, purchase of 15
        let verdict = check_purchase(100.0, 90.0, 15.0, "X");
        assert_eq!(verdict.recommendation, Recommendation::Deny);
        assert_eq!(verdict.remaining_before, 10.0);
        assert_eq!(verdict.remaining_after, -5.0);
        assert!(verdict.reason.contains("$5.00"));
    }

    #[test]
    fn test_caution_when_under_ten_percent_left() {
        // remaining_after = 5, which is under 10% of 100
        let verdict = check_purchase(100.0, 0.0, 95.0, "X");
        assert_eq!(verdict.recommendation, Recommendation::Caution);
        assert_eq!(verdict.remaining_after, 5.0);
        assert!(verdict.reason.contains("5.0%"));
    }

    #[test]
    fn test_approve_when_comfortably_within_budget() {
        let verdict = check_purchase(100.0, 0.0, 50.0, "X");
        assert_eq!(verdict.recommendation, Recommendation::Approve);
        assert!(verdict.reason.contains("$50.00"));
    }

    #[test]
    fn test_already_over_budget_is_denied() {
        // Negative remaining_before is legal input; any positive purchase
        // exceeds it
        let verdict = check_purchase(100.0, 150.0, 1.0, "Food");
        assert_eq!(verdict.recommendation, Recommendation::Deny);
        assert_eq!(verdict.remaining_before, -50.0);
    }

    #[test]
    fn test_boundary_exactly_ten_percent_is_caution() {
        // remaining_after exactly 10.0 is not < 10% of 100, so approve
        let verdict = check_purchase(100.0, 40.0, 50.0, "X");
        assert_eq!(verdict.remaining_after, 10.0);
        assert_eq!(verdict.recommendation, Recommendation::Approve);
    }
}
