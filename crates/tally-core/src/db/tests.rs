//! Database tests

use chrono::Utc;

use super::*;
use crate::models::*;

fn tx(amount: f64, description: &str, category: &str, kind: TransactionKind) -> NewTransaction {
    NewTransaction {
        amount,
        description: description.to_string(),
        category: category.to_string(),
        kind,
        occurred_at: Utc::now(),
    }
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert_eq!(db.count_users().unwrap(), 0);
    assert_eq!(db.count_transactions().unwrap(), 0);
}

#[test]
fn test_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('transactions') WHERE name IN ('id', 'user_id', 'amount', 'description', 'category', 'kind', 'occurred_at', 'created_at')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 8, "transactions table should have 8 expected columns");

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('budget_rules') WHERE name IN ('id', 'user_id', 'kind', 'name', 'config', 'is_active', 'created_at')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 7, "budget_rules table should have 7 expected columns");
}

#[test]
fn test_resolve_user_idempotent() {
    let db = Database::in_memory().unwrap();

    let id1 = db.resolve_user("alice").unwrap();
    let id2 = db.resolve_user("alice").unwrap();
    assert_eq!(id1, id2);
    assert_eq!(db.count_users().unwrap(), 1);

    let other = db.resolve_user("bob").unwrap();
    assert_ne!(id1, other);
    assert_eq!(db.count_users().unwrap(), 2);
}

#[test]
fn test_transaction_insert_and_list() {
    let db = Database::in_memory().unwrap();
    let user = db.resolve_user("alice").unwrap();

    let id = db
        .insert_transaction(user, &tx(50.0, "Groceries run", "Food", TransactionKind::Expense))
        .unwrap();
    assert!(id > 0);
    db.insert_transaction(user, &tx(2000.0, "Paycheck", "Salary", TransactionKind::Income))
        .unwrap();

    let all = db
        .list_transactions(user, &TransactionQuery::default())
        .unwrap();
    assert_eq!(all.len(), 2);

    let expenses = db
        .list_transactions(
            user,
            &TransactionQuery {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].description, "Groceries run");
    assert_eq!(expenses[0].kind, TransactionKind::Expense);

    let food = db
        .list_transactions(
            user,
            &TransactionQuery {
                category: Some("Food".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(food.len(), 1);

    // Category matching is case-sensitive
    let food_lower = db
        .list_transactions(
            user,
            &TransactionQuery {
                category: Some("food".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(food_lower.is_empty());
}

#[test]
fn test_transaction_list_limit() {
    let db = Database::in_memory().unwrap();
    let user = db.resolve_user("alice").unwrap();

    for i in 0..5 {
        db.insert_transaction(
            user,
            &tx(10.0 + i as f64, "Coffee", "Food", TransactionKind::Expense),
        )
        .unwrap();
    }

    let limited = db
        .list_transactions(
            user,
            &TransactionQuery {
                limit: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(limited.len(), 3);
}

#[test]
fn test_transaction_delete_requires_owner() {
    let db = Database::in_memory().unwrap();
    let alice = db.resolve_user("alice").unwrap();
    let bob = db.resolve_user("bob").unwrap();

    let id = db
        .insert_transaction(alice, &tx(25.0, "Lunch", "Food", TransactionKind::Expense))
        .unwrap();

    // Bob cannot delete Alice's transaction, and the row survives
    assert!(!db.delete_transaction(id, bob).unwrap());
    assert_eq!(db.count_transactions().unwrap(), 1);

    assert!(db.delete_transaction(id, alice).unwrap());
    assert_eq!(db.count_transactions().unwrap(), 0);

    // Second delete of the same id reports not-found
    assert!(!db.delete_transaction(id, alice).unwrap());
}

#[test]
fn test_category_insert_and_list() {
    let db = Database::in_memory().unwrap();
    let user = db.resolve_user("alice").unwrap();

    db.insert_category(user, "Food", 500.0).unwrap();
    db.insert_category(user, "Transport", 150.0).unwrap();

    let categories = db.list_categories(user).unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Food");
    assert_eq!(categories[0].monthly_limit, 500.0);
    assert_eq!(categories[1].name, "Transport");

    // Duplicate names are allowed (not enforced unique)
    db.insert_category(user, "Food", 600.0).unwrap();
    assert_eq!(db.list_categories(user).unwrap().len(), 3);

    // Other users see nothing
    let bob = db.resolve_user("bob").unwrap();
    assert!(db.list_categories(bob).unwrap().is_empty());
}

#[test]
fn test_rule_crud() {
    let db = Database::in_memory().unwrap();
    let user = db.resolve_user("alice").unwrap();

    let id = db
        .insert_rule(
            user,
            RuleKind::CategoryLimit,
            "Food cap",
            r#"{"category":"Food","limit":500}"#,
        )
        .unwrap();
    assert!(id > 0);

    let rules = db.list_active_rules(user).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].kind, RuleKind::CategoryLimit);
    assert_eq!(rules[0].name, "Food cap");
    assert!(rules[0].is_active);

    // Deactivated rules drop out of the active listing
    let conn = db.conn().unwrap();
    conn.execute(
        "UPDATE budget_rules SET is_active = 0 WHERE id = ?",
        rusqlite::params![id],
    )
    .unwrap();
    drop(conn);
    assert!(db.list_active_rules(user).unwrap().is_empty());
}

#[test]
fn test_rule_delete_requires_owner() {
    let db = Database::in_memory().unwrap();
    let alice = db.resolve_user("alice").unwrap();
    let bob = db.resolve_user("bob").unwrap();

    let id = db
        .insert_rule(alice, RuleKind::SavingsGoal, "Save 1k", r#"{"goal":1000}"#)
        .unwrap();

    assert!(!db.delete_rule(id, bob).unwrap());
    assert_eq!(db.count_rules().unwrap(), 1);

    assert!(db.delete_rule(id, alice).unwrap());
    assert_eq!(db.count_rules().unwrap(), 0);
}

#[test]
fn test_rules_listed_in_creation_order() {
    let db = Database::in_memory().unwrap();
    let user = db.resolve_user("alice").unwrap();

    db.insert_rule(user, RuleKind::SavingsGoal, "first", r#"{"goal":100}"#)
        .unwrap();
    db.insert_rule(
        user,
        RuleKind::SpendingAlert,
        "second",
        r#"{"category":"Fun","threshold":50}"#,
    )
    .unwrap();
    db.insert_rule(
        user,
        RuleKind::PercentageAllocation,
        "third",
        r#"{"savings":20}"#,
    )
    .unwrap();

    let names: Vec<String> = db
        .list_active_rules(user)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}
