//! Month-end spending projection
//!
//! Projects end-of-month spend from a partial-month pace. Pure calculation;
//! the caller supplies the calendar position and amounts.

use serde::Serialize;

use crate::error::{Error, Result};

/// Whether the projected month total lands under or over the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaceStatus {
    OnTrack,
    OverBudget,
}

impl PaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "ON_TRACK",
            Self::OverBudget => "OVER_BUDGET",
        }
    }
}

/// Projection record; monetary fields are rounded to 2dp for presentation
#[derive(Debug, Clone, Serialize)]
pub struct SpendingProjection {
    pub current_day: i64,
    pub days_in_month: i64,
    pub spent_so_far: f64,
    pub daily_average: f64,
    pub projected_month_total: f64,
    pub budget_limit: f64,
    pub projected_difference: f64,
    pub status: PaceStatus,
    pub message: String,
    /// Safe daily spend for the rest of the month; only set when over budget
    /// with days remaining
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_daily_limit: Option<f64>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Project month-end spending from the pace so far.
///
/// `current_day` must be positive; zero or negative days are an input error
/// (reported, never a crash).
pub fn project_spending(
    current_day: i64,
    days_in_month: i64,
    amount_spent_so_far: f64,
    budget_limit: f64,
) -> Result<SpendingProjection> {
    if current_day <= 0 {
        return Err(Error::InvalidData(
            "current_day_of_month must be positive".to_string(),
        ));
    }

    let daily_rate = amount_spent_so_far / current_day as f64;
    let projected_total = daily_rate * days_in_month as f64;
    let difference = budget_limit - projected_total;

    let (status, message, recommended_daily_limit) = if difference >= 0.0 {
        (
            PaceStatus::OnTrack,
            format!(
                "At current pace, you'll finish ${:.2} under budget.",
                difference
            ),
            None,
        )
    } else {
        let remaining_days = days_in_month - current_day;
        let recommended = if remaining_days > 0 {
            let remaining_budget = budget_limit - amount_spent_so_far;
            Some(round2((remaining_budget / remaining_days as f64).max(0.0)))
        } else {
            None
        };
        (
            PaceStatus::OverBudget,
            format!(
                "Warning: At current pace, you'll be ${:.2} over budget.",
                difference.abs()
            ),
            recommended,
        )
    };

    Ok(SpendingProjection {
        current_day,
        days_in_month,
        spent_so_far: amount_spent_so_far,
        daily_average: round2(daily_rate),
        projected_month_total: round2(projected_total),
        budget_limit,
        projected_difference: round2(difference),
        status,
        message,
        recommended_daily_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_zero_is_an_input_error() {
        let result = project_spending(0, 30, 100.0, 500.0);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_negative_day_is_an_input_error() {
        assert!(project_spending(-3, 30, 100.0, 500.0).is_err());
    }

    #[test]
    fn test_over_budget_pace_with_recommendation() {
        // daily rate 20, projected 600 against 500: 100 over, 20 days left,
        // 300 remaining budget -> 15/day
        let p = project_spending(10, 30, 200.0, 500.0).unwrap();
        assert_eq!(p.status, PaceStatus::OverBudget);
        assert_eq!(p.daily_average, 20.0);
        assert_eq!(p.projected_month_total, 600.0);
        assert_eq!(p.projected_difference, -100.0);
        assert_eq!(p.recommended_daily_limit, Some(15.0));
        assert!(p.message.contains("$100.00 over budget"));
    }

    #[test]
    fn test_on_track_pace() {
        // daily rate 10, projected 300 against 500
        let p = project_spending(10, 30, 100.0, 500.0).unwrap();
        assert_eq!(p.status, PaceStatus::OnTrack);
        assert_eq!(p.projected_difference, 200.0);
        assert!(p.recommended_daily_limit.is_none());
        assert!(p.message.contains("$200.00 under budget"));
    }

    #[test]
    fn test_over_budget_on_last_day_has_no_recommendation() {
        let p = project_spending(30, 30, 600.0, 500.0).unwrap();
        assert_eq!(p.status, PaceStatus::OverBudget);
        assert!(p.recommended_daily_limit.is_none());
    }

    #[test]
    fn test_recommendation_floors_at_zero() {
        // Already past the limit: safe daily spend is 0, not negative
        let p = project_spending(10, 30, 550.0, 500.0).unwrap();
        assert_eq!(p.recommended_daily_limit, Some(0.0));
    }
}
