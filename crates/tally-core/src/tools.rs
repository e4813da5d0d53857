//! Tool implementations behind the MCP surface
//!
//! Each public function here backs one callable tool: it takes a typed
//! parameter struct, does the work against the store and the analysis
//! modules, and renders the agent-facing text. Parameter structs derive
//! [`schemars::JsonSchema`] so the transport layer can publish schemas.
//!
//! Handled input problems (bad enum values, malformed config JSON) are
//! reported as `Ok` text starting with "Error:"; only infrastructure
//! failures surface as `Err`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::advisor::check_purchase;
use crate::aggregate::{aggregate, AggregateSnapshot};
use crate::allocation::{budget_methods, suggest_allocation};
use crate::compliance::{evaluate_rules, ComplianceStatus};
use crate::db::{Database, TransactionQuery};
use crate::error::Result;
use crate::health::health_score;
use crate::insights::{spending_insights, NO_DATA_MESSAGE};
use crate::models::{NewTransaction, RuleConfig, RuleKind, TransactionKind};
use crate::projection::project_spending;

fn default_username() -> String {
    "default_user".to_string()
}

fn default_category() -> String {
    "Uncategorized".to_string()
}

fn default_transaction_type() -> String {
    "expense".to_string()
}

fn default_limit() -> i64 {
    10
}

fn default_general() -> String {
    "General".to_string()
}

fn default_method() -> String {
    "50/30/20".to_string()
}

/// Parse a caller-supplied date, accepting a bare date or a full timestamp
fn parse_user_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Load everything needed to analyze a user's finances
fn load_snapshot(db: &Database, user_id: i64) -> Result<AggregateSnapshot> {
    let transactions = db.list_transactions(user_id, &TransactionQuery::default())?;
    Ok(aggregate(&transactions))
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddTransactionParams {
    #[schemars(description = "The monetary value of the transaction")]
    pub amount: f64,
    #[schemars(description = "A brief description of what the transaction was for")]
    pub description: String,
    #[serde(default = "default_category")]
    #[schemars(description = "The budget category (e.g. \"Food\", \"Transport\")")]
    pub category: String,
    #[serde(default = "default_transaction_type")]
    #[schemars(description = "Either \"expense\" or \"income\"")]
    pub transaction_type: String,
    #[serde(default = "default_username")]
    #[schemars(description = "The user's identifier")]
    pub username: String,
    #[serde(default)]
    #[schemars(description = "Optional date (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS), defaults to now")]
    pub date: Option<String>,
}

/// Record a new expense or income transaction
pub fn add_transaction(db: &Database, params: AddTransactionParams) -> Result<String> {
    let kind: TransactionKind = match params.transaction_type.parse() {
        Ok(kind) => kind,
        Err(msg) => return Ok(format!("Error: {}", msg)),
    };

    let occurred_at = match params.date.as_deref() {
        Some(raw) => match parse_user_date(raw) {
            Some(dt) => dt,
            None => {
                return Ok(format!(
                    "Error: Invalid date '{}'. Use YYYY-MM-DD or YYYY-MM-DD HH:MM:SS.",
                    raw
                ))
            }
        },
        None => Utc::now(),
    };

    let user_id = db.resolve_user(&params.username)?;
    let id = db.insert_transaction(
        user_id,
        &NewTransaction {
            amount: params.amount,
            description: params.description.clone(),
            category: params.category,
            kind,
            occurred_at,
        },
    )?;

    Ok(format!(
        "Transaction added: {} ({}) - ID: {}",
        params.description, params.amount, id
    ))
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteTransactionParams {
    #[schemars(description = "The id of the transaction to delete")]
    pub transaction_id: i64,
    #[serde(default = "default_username")]
    #[schemars(description = "The user's identifier")]
    pub username: String,
}

/// Delete a transaction by id; owner-scoped
pub fn delete_transaction(db: &Database, params: DeleteTransactionParams) -> Result<String> {
    let user_id = db.resolve_user(&params.username)?;
    if db.delete_transaction(params.transaction_id, user_id)? {
        Ok(format!(
            "Transaction {} deleted successfully.",
            params.transaction_id
        ))
    } else {
        Ok(format!(
            "Transaction {} not found or access denied.",
            params.transaction_id
        ))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTransactionsParams {
    #[serde(default = "default_username")]
    #[schemars(description = "The user's identifier")]
    pub username: String,
    #[serde(default)]
    #[schemars(description = "Only show transactions in this category")]
    pub category: Option<String>,
    #[serde(default)]
    #[schemars(description = "Only show \"expense\" or \"income\" transactions")]
    pub transaction_type: Option<String>,
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of transactions to return")]
    pub limit: i64,
}

impl Default for GetTransactionsParams {
    fn default() -> Self {
        Self {
            username: default_username(),
            category: None,
            transaction_type: None,
            limit: default_limit(),
        }
    }
}

/// List recent transactions with optional filtering
pub fn get_transactions(db: &Database, params: GetTransactionsParams) -> Result<String> {
    let kind = match params.transaction_type.as_deref() {
        Some(raw) => match raw.parse::<TransactionKind>() {
            Ok(kind) => Some(kind),
            Err(_) => return Ok(format!("Error: Invalid transaction type '{}'.", raw)),
        },
        None => None,
    };

    let user_id = db.resolve_user(&params.username)?;
    let transactions = db.list_transactions(
        user_id,
        &TransactionQuery {
            category: params.category,
            kind,
            limit: Some(params.limit),
        },
    )?;

    if transactions.is_empty() {
        return Ok("No transactions found.".to_string());
    }

    let mut output = vec![format!("Found {} transactions:", transactions.len())];
    for tx in &transactions {
        output.push(format!(
            "- [{}] {}: ${} ({}) [{}] ID: {}",
            tx.occurred_at.format("%Y-%m-%d"),
            tx.description,
            tx.amount,
            tx.category,
            tx.kind,
            tx.id
        ));
    }
    Ok(output.join("\n"))
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateBudgetCategoryParams {
    #[schemars(description = "The category name")]
    pub name: String,
    #[schemars(description = "The monthly spending limit for this category")]
    pub monthly_limit: f64,
    #[serde(default = "default_username")]
    #[schemars(description = "The user's identifier")]
    pub username: String,
}

/// Create a budget category with a monthly spending limit
pub fn create_budget_category(db: &Database, params: CreateBudgetCategoryParams) -> Result<String> {
    let user_id = db.resolve_user(&params.username)?;
    db.insert_category(user_id, &params.name, params.monthly_limit)?;
    Ok(format!(
        "Category '{}' created with limit ${}.",
        params.name, params.monthly_limit
    ))
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UsernameParams {
    #[serde(default = "default_username")]
    #[schemars(description = "The user's identifier")]
    pub username: String,
}

impl Default for UsernameParams {
    fn default() -> Self {
        Self {
            username: default_username(),
        }
    }
}

/// List all budget categories and their limits
pub fn get_budget_categories(db: &Database, params: UsernameParams) -> Result<String> {
    let user_id = db.resolve_user(&params.username)?;
    let categories = db.list_categories(user_id)?;

    if categories.is_empty() {
        return Ok("No categories set.".to_string());
    }

    let mut output = vec!["Budget Categories:".to_string()];
    for category in &categories {
        output.push(format!(
            "- {}: ${}/month",
            category.name, category.monthly_limit
        ));
    }
    Ok(output.join("\n"))
}

/// Dashboard summary with totals and a per-category breakdown
pub fn get_dashboard_summary(db: &Database, params: UsernameParams) -> Result<String> {
    let user_id = db.resolve_user(&params.username)?;
    let snapshot = load_snapshot(db, user_id)?;
    let categories = db.list_categories(user_id)?;

    // Union of categories that have spend and categories that have a limit,
    // in sorted order. A duplicate category name keeps the last stored limit.
    let mut breakdown: std::collections::BTreeMap<String, (f64, Option<f64>)> =
        std::collections::BTreeMap::new();
    for (name, &spent) in &snapshot.expense_by_category {
        breakdown.insert(name.clone(), (spent, None));
    }
    for category in &categories {
        breakdown
            .entry(category.name.clone())
            .or_insert((0.0, None))
            .1 = Some(category.monthly_limit);
    }

    let mut lines = vec![
        "**Dashboard Summary**".to_string(),
        format!("Total Income: ${:.2}", snapshot.total_income),
        format!("Total Expenses: ${:.2}", snapshot.total_expenses),
        format!("Net: ${:.2}", snapshot.net()),
        String::new(),
        "**Category Breakdown:**".to_string(),
    ];

    for (name, (spent, limit)) in &breakdown {
        let limit_str = match limit {
            Some(limit) => format!(" / ${}", limit),
            None => String::new(),
        };
        let remaining_str = match limit {
            Some(limit) => format!(" (Remaining: ${:.2})", limit - spent),
            None => String::new(),
        };
        lines.push(format!(
            "- {}: ${:.2}{}{}",
            name, spent, limit_str, remaining_str
        ));
    }

    Ok(lines.join("\n"))
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateBudgetRuleParams {
    #[schemars(description = "One of \"percentage_allocation\", \"category_limit\", \"savings_goal\", \"spending_alert\"")]
    pub rule_type: String,
    #[schemars(description = "A friendly name for the rule (e.g. \"50/30/20 Rule\")")]
    pub name: String,
    #[schemars(description = "JSON string with the rule configuration, e.g. {\"category\": \"Food\", \"limit\": 500}")]
    pub config: String,
    #[serde(default = "default_username")]
    #[schemars(description = "The user's identifier")]
    pub username: String,
}

/// Create a budget rule; the config payload is validated before storing
pub fn create_budget_rule(db: &Database, params: CreateBudgetRuleParams) -> Result<String> {
    let kind: RuleKind = match params.rule_type.parse() {
        Ok(kind) => kind,
        Err(msg) => return Ok(format!("Error: {}", msg)),
    };

    if let Err(e) = RuleConfig::parse(kind, &params.config) {
        return Ok(format!("Error: {}", e));
    }

    let user_id = db.resolve_user(&params.username)?;
    let id = db.insert_rule(user_id, kind, &params.name, &params.config)?;
    Ok(format!(
        "Budget rule '{}' created successfully (ID: {}).",
        params.name, id
    ))
}

/// List all active budget rules for a user
pub fn get_budget_rules(db: &Database, params: UsernameParams) -> Result<String> {
    let user_id = db.resolve_user(&params.username)?;
    let rules = db.list_active_rules(user_id)?;

    if rules.is_empty() {
        return Ok("No budget rules set.".to_string());
    }

    let mut output = vec!["Active Budget Rules:".to_string()];
    for rule in &rules {
        output.push(format!("- [{}] {} (ID: {})", rule.kind, rule.name, rule.id));
        output.push(format!("  Config: {}", rule.config));
    }
    Ok(output.join("\n"))
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteBudgetRuleParams {
    #[schemars(description = "The id of the rule to delete")]
    pub rule_id: i64,
    #[serde(default = "default_username")]
    #[schemars(description = "The user's identifier")]
    pub username: String,
}

/// Delete a budget rule by id; owner-scoped
pub fn delete_budget_rule(db: &Database, params: DeleteBudgetRuleParams) -> Result<String> {
    let user_id = db.resolve_user(&params.username)?;
    if db.delete_rule(params.rule_id, user_id)? {
        Ok(format!("Budget rule {} deleted successfully.", params.rule_id))
    } else {
        Ok(format!(
            "Budget rule {} not found or access denied.",
            params.rule_id
        ))
    }
}

/// Evaluate all active rules and render a compliance report
pub fn check_rule_compliance(db: &Database, params: UsernameParams) -> Result<String> {
    let user_id = db.resolve_user(&params.username)?;
    let rules = db.list_active_rules(user_id)?;

    if rules.is_empty() {
        return Ok("No active budget rules found.".to_string());
    }

    let snapshot = load_snapshot(db, user_id)?;
    let verdicts = evaluate_rules(&snapshot, &rules);

    let mut lines = vec!["**Budget Rule Compliance Report**".to_string(), String::new()];
    for verdict in &verdicts {
        let status = match verdict.status {
            ComplianceStatus::Compliant | ComplianceStatus::NoAlert => "✅ Compliant",
            ComplianceStatus::NotCompliant | ComplianceStatus::AlertTriggered => {
                "❌ Not Compliant"
            }
            ComplianceStatus::Indeterminate => "⚠️ Cannot determine",
        };
        lines.push(format!(
            "**{}** ({}): {}",
            verdict.rule_name, verdict.rule_kind, status
        ));

        if let Some(detail) = &verdict.detail {
            let suffix = match verdict.status {
                ComplianceStatus::AlertTriggered => " - 🔔 ALERT TRIGGERED",
                ComplianceStatus::NoAlert => " - No alert",
                _ => "",
            };
            lines.push(format!("  {}{}", detail, suffix));
        }
        lines.push(String::new());
    }

    Ok(lines.join("\n"))
}

/// Generate spending insights for proactive budget advice
pub fn get_spending_insights(db: &Database, params: UsernameParams) -> Result<String> {
    let user_id = db.resolve_user(&params.username)?;
    let snapshot = load_snapshot(db, user_id)?;
    let categories = db.list_categories(user_id)?;

    let insights = spending_insights(&snapshot, &categories);
    if insights.len() == 1 && insights[0] == NO_DATA_MESSAGE {
        return Ok(NO_DATA_MESSAGE.to_string());
    }
    Ok(format!("**Spending Insights**\n{}", insights.join("\n")))
}

// Pure tools below need no storage access; they exist so a client-side agent
// can reason about hypotheticals without mutating anything.

/// Catalog of popular budgeting methods, as pretty JSON
pub fn get_budget_methods() -> Result<String> {
    Ok(serde_json::to_string_pretty(&budget_methods())?)
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckPurchaseParams {
    #[schemars(description = "The monthly budget limit for this category")]
    pub budget_limit: f64,
    #[schemars(description = "How much has already been spent in this category")]
    pub amount_spent: f64,
    #[schemars(description = "The cost of the proposed purchase")]
    pub purchase_amount: f64,
    #[serde(default = "default_general")]
    #[schemars(description = "The category name (for display purposes)")]
    pub category: String,
}

/// Evaluate whether a proposed purchase fits the budget
pub fn check_budget_for_purchase(params: CheckPurchaseParams) -> Result<String> {
    let verdict = check_purchase(
        params.budget_limit,
        params.amount_spent,
        params.purchase_amount,
        &params.category,
    );
    Ok(serde_json::to_string_pretty(&verdict)?)
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SuggestAllocationParams {
    #[schemars(description = "The user's monthly income")]
    pub monthly_income: f64,
    #[serde(default = "default_method")]
    #[schemars(description = "Budget method to use (\"50/30/20\", \"80/20\", \"pay_yourself_first\")")]
    pub method: String,
}

/// Suggest budget allocations for an income and method
pub fn suggest_budget_allocation(params: SuggestAllocationParams) -> Result<String> {
    let plan = suggest_allocation(params.monthly_income, &params.method)?;
    Ok(serde_json::to_string_pretty(&plan)?)
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct HealthScoreParams {
    #[schemars(description = "Total monthly income")]
    pub total_income: f64,
    #[schemars(description = "Total monthly expenses")]
    pub total_expenses: f64,
    #[serde(default)]
    #[schemars(description = "Number of categories currently over budget")]
    pub categories_over_budget: u32,
    #[serde(default)]
    #[schemars(description = "Whether the user has 3+ months of expenses saved")]
    pub has_emergency_fund: bool,
    #[serde(default)]
    #[schemars(description = "Monthly debt payments / monthly income (0.0 to 1.0)")]
    pub debt_to_income_ratio: f64,
}

/// Calculate a 0-100 financial health score
pub fn get_budget_health_score(params: HealthScoreParams) -> Result<String> {
    let score = health_score(
        params.total_income,
        params.total_expenses,
        params.categories_over_budget,
        params.has_emergency_fund,
        params.debt_to_income_ratio,
    );
    Ok(serde_json::to_string_pretty(&score)?)
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProjectSpendingParams {
    #[schemars(description = "What day of the month it is (1-31)")]
    pub current_day_of_month: i64,
    #[schemars(description = "Total days in this month (28-31)")]
    pub days_in_month: i64,
    #[schemars(description = "How much has been spent so far this month")]
    pub amount_spent_so_far: f64,
    #[schemars(description = "The monthly budget limit")]
    pub budget_limit: f64,
}

/// Project end-of-month spending from the pace so far
pub fn project_monthly_spending(params: ProjectSpendingParams) -> Result<String> {
    let projection = project_spending(
        params.current_day_of_month,
        params.days_in_month,
        params.amount_spent_so_far,
        params.budget_limit,
    )?;
    Ok(serde_json::to_string_pretty(&projection)?)
}
