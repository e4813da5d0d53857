//! Budget rule compliance evaluation
//!
//! Consumes an [`AggregateSnapshot`] plus a user's stored rules and produces
//! a per-rule verdict. Policy dispatches on the rule kind; a rule whose
//! stored config cannot be parsed degrades to an indeterminate verdict
//! instead of failing the whole report.

use serde::Serialize;

use crate::aggregate::AggregateSnapshot;
use crate::models::{BudgetRule, RuleConfig, RuleKind};

/// Outcome of evaluating one rule
///
/// `spending_alert` rules have no compliant/non-compliant framing; they are
/// one-sided triggers reported as `AlertTriggered` / `NoAlert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NotCompliant,
    Indeterminate,
    AlertTriggered,
    NoAlert,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NotCompliant => "not_compliant",
            Self::Indeterminate => "indeterminate",
            Self::AlertTriggered => "alert_triggered",
            Self::NoAlert => "no_alert",
        }
    }
}

/// Verdict for a single rule, in the order rules were stored
#[derive(Debug, Clone, Serialize)]
pub struct RuleVerdict {
    pub rule_name: String,
    pub rule_kind: RuleKind,
    pub status: ComplianceStatus,
    /// Raw numeric comparison (actual vs. target) backing the verdict;
    /// absent when the verdict is indeterminate due to a bad config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Evaluate all given rules against the snapshot, preserving rule order.
///
/// Callers pass the active rule set; this function does not filter on
/// `is_active` itself.
pub fn evaluate_rules(snapshot: &AggregateSnapshot, rules: &[BudgetRule]) -> Vec<RuleVerdict> {
    rules.iter().map(|rule| evaluate_rule(snapshot, rule)).collect()
}

fn evaluate_rule(snapshot: &AggregateSnapshot, rule: &BudgetRule) -> RuleVerdict {
    let config = match RuleConfig::parse(rule.kind, &rule.config) {
        Ok(config) => config,
        Err(_) => {
            // Stored config predates validation or was hand-edited; degrade
            return RuleVerdict {
                rule_name: rule.name.clone(),
                rule_kind: rule.kind,
                status: ComplianceStatus::Indeterminate,
                detail: None,
            };
        }
    };

    let (status, detail) = match config {
        RuleConfig::PercentageAllocation { savings } => {
            if snapshot.total_income > 0.0 {
                let actual_pct =
                    (snapshot.total_income - snapshot.total_expenses) / snapshot.total_income
                        * 100.0;
                let status = if actual_pct >= savings {
                    ComplianceStatus::Compliant
                } else {
                    ComplianceStatus::NotCompliant
                };
                (
                    status,
                    Some(format!(
                        "Target savings: {}% | Actual: {:.1}%",
                        savings, actual_pct
                    )),
                )
            } else {
                (
                    ComplianceStatus::Indeterminate,
                    Some("No income recorded yet.".to_string()),
                )
            }
        }
        RuleConfig::CategoryLimit { category, limit } => {
            let spent = snapshot.spent_in(&category);
            let status = if spent <= limit {
                ComplianceStatus::Compliant
            } else {
                ComplianceStatus::NotCompliant
            };
            (
                status,
                Some(format!("{}: ${:.2} / ${:.2}", category, spent, limit)),
            )
        }
        RuleConfig::SavingsGoal { goal } => {
            let saved = snapshot.net();
            let status = if saved >= goal {
                ComplianceStatus::Compliant
            } else {
                ComplianceStatus::NotCompliant
            };
            (
                status,
                Some(format!("Saved: ${:.2} / Goal: ${:.2}", saved, goal)),
            )
        }
        RuleConfig::SpendingAlert {
            category,
            threshold,
        } => {
            let spent = snapshot.spent_in(&category);
            let status = if spent >= threshold {
                ComplianceStatus::AlertTriggered
            } else {
                ComplianceStatus::NoAlert
            };
            (
                status,
                Some(format!(
                    "{}: ${:.2} (threshold: ${:.2})",
                    category, spent, threshold
                )),
            )
        }
    };

    RuleVerdict {
        rule_name: rule.name.clone(),
        rule_kind: rule.kind,
        status,
        detail,
    }
}
