//! Financial health scoring
//!
//! Pure function mapping aggregate financial signals to a 0-100 score with a
//! letter grade and a short advisory message.

use serde::Serialize;

/// Letter grade for a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

/// Contributing factors, echoed back so the caller can explain the score
#[derive(Debug, Clone, Serialize)]
pub struct HealthFactors {
    pub savings_rate_impact: &'static str,
    pub over_budget_categories: u32,
    pub emergency_fund: bool,
    pub debt_to_income: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthScore {
    pub score: i32,
    pub grade: Grade,
    pub message: &'static str,
    pub factors: HealthFactors,
}

/// Compute a 0-100 financial health score.
///
/// Starts from a neutral 50 and applies, in order: a savings-rate adjustment
/// (only when income is positive), an over-budget penalty capped at 15, an
/// emergency-fund bonus, and a debt-to-income penalty with exclusive
/// thresholds checked highest-first. The result is clamped to [0, 100].
pub fn health_score(
    total_income: f64,
    total_expenses: f64,
    categories_over_budget: u32,
    has_emergency_fund: bool,
    debt_to_income_ratio: f64,
) -> HealthScore {
    let mut score: i32 = 50;

    // Savings rate impact (-20 to +30); no adjustment when there is no income
    if total_income > 0.0 {
        let savings_rate = (total_income - total_expenses) / total_income;
        if savings_rate >= 0.20 {
            score += 30;
        } else if savings_rate >= 0.10 {
            score += 15;
        } else if savings_rate >= 0.0 {
            score += 5;
        } else {
            // Spending more than earning
            score -= 20;
        }
    }

    // Categories over budget (-15 max)
    score -= (categories_over_budget as i32 * 5).min(15);

    // Emergency fund (+15)
    if has_emergency_fund {
        score += 15;
    }

    // Debt-to-income ratio (-20 to 0), exclusive lower bounds, first match wins
    if debt_to_income_ratio > 0.50 {
        score -= 20;
    } else if debt_to_income_ratio > 0.30 {
        score -= 10;
    } else if debt_to_income_ratio > 0.15 {
        score -= 5;
    }

    let score = score.clamp(0, 100);

    let (grade, message) = if score >= 80 {
        (Grade::A, "Excellent financial health! Keep it up.")
    } else if score >= 60 {
        (Grade::B, "Good financial health with room for improvement.")
    } else if score >= 40 {
        (Grade::C, "Fair financial health. Consider reviewing your budget.")
    } else if score >= 20 {
        (Grade::D, "Poor financial health. Immediate action recommended.")
    } else {
        (Grade::F, "Critical financial situation. Seek professional advice.")
    };

    let savings_rate_impact = if total_income > 0.0 && total_income - total_expenses > 0.0 {
        "positive"
    } else {
        "negative"
    };

    HealthScore {
        score,
        grade,
        message,
        factors: HealthFactors {
            savings_rate_impact,
            over_budget_categories: categories_over_budget,
            emergency_fund: has_emergency_fund,
            debt_to_income: debt_to_income_ratio,
        },
    }
}
