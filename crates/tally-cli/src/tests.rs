//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use crate::commands;

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tally.db");

    commands::cmd_init(&db_path, true).unwrap();
    assert!(db_path.exists());

    // Schema is in place
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
             ('users', 'transactions', 'budget_categories', 'budget_rules')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 4);
}

#[test]
fn test_cmd_init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tally.db");

    commands::cmd_init(&db_path, true).unwrap();
    commands::cmd_init(&db_path, true).unwrap();
}

#[test]
fn test_cmd_status_without_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("missing.db");

    // Status on a missing database reports, never fails
    commands::cmd_status(&db_path, true).unwrap();
}

#[test]
fn test_cmd_status_with_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tally.db");

    commands::cmd_init(&db_path, true).unwrap();
    commands::cmd_status(&db_path, true).unwrap();
}

#[test]
fn test_open_db_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tally.db");

    let db = commands::open_db(&db_path, true).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 0);
}
