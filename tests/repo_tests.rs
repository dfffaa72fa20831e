// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerdash::error::Error;
use ledgerdash::period::DateRange;
use ledgerdash::repo::{self, SortOrder};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE users(
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE transactions(
            transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(user_id),
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            transaction_type TEXT NOT NULL,
            amount TEXT NOT NULL,
            category TEXT NOT NULL,
            payment_method TEXT NOT NULL,
            merchant TEXT NOT NULL,
            balance TEXT NOT NULL
        );
        CREATE TABLE budgets(
            budget_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(user_id),
            monthly_limit TEXT NOT NULL,
            date TEXT NOT NULL
        );
        CREATE TABLE spending_scores(
            user_id INTEGER NOT NULL REFERENCES users(user_id),
            score TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .unwrap();
    conn.execute("INSERT INTO users(username) VALUES('alice')", [])
        .unwrap();
    conn
}

fn insert_tx(conn: &Connection, date: &str, amount: &str, balance: &str) {
    conn.execute(
        "INSERT INTO transactions(user_id, date, description, transaction_type,
                                  amount, category, payment_method, merchant, balance)
         VALUES (1, ?1, 'coffee', 'Debit', ?2, 'Dining Out', 'Debit Card', 'Cafe', ?3)",
        params![date, amount, balance],
    )
    .unwrap();
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn user_id_for_unknown_user_is_not_found() {
    let conn = setup();
    assert_eq!(repo::user_id_for(&conn, "alice").unwrap(), 1);
    let err = repo::user_id_for(&conn, "bob").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.to_string().contains("bob"));
}

#[test]
fn latest_balance_empty_ledger_is_none() {
    let conn = setup();
    assert_eq!(repo::latest_balance(&conn, 1).unwrap(), None);
}

#[test]
fn latest_balance_breaks_date_ties_by_id() {
    let conn = setup();
    insert_tx(&conn, "2025-03-01", "-10", "90");
    insert_tx(&conn, "2025-03-02", "-5", "85");
    insert_tx(&conn, "2025-03-02", "-3", "82");
    assert_eq!(repo::latest_balance(&conn, 1).unwrap(), Some(dec("82")));
}

#[test]
fn latest_balance_prefers_latest_date_over_latest_insert() {
    let conn = setup();
    insert_tx(&conn, "2025-03-05", "-10", "90");
    // Backdated row inserted later must not become the tip.
    insert_tx(&conn, "2025-03-01", "-5", "85");
    assert_eq!(repo::latest_balance(&conn, 1).unwrap(), Some(dec("90")));
}

#[test]
fn transactions_in_range_is_inclusive_and_ascending() {
    let conn = setup();
    insert_tx(&conn, "2025-02-28", "-1", "99");
    insert_tx(&conn, "2025-03-01", "-2", "97");
    insert_tx(&conn, "2025-03-31", "-3", "94");
    insert_tx(&conn, "2025-04-01", "-4", "90");
    let range = DateRange {
        start: Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
        end: Some(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
    };
    let txs = repo::transactions_in_range(&conn, 1, &range).unwrap();
    let dates: Vec<String> = txs.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-03-01", "2025-03-31"]);
}

#[test]
fn transactions_in_range_unbounded_returns_everything() {
    let conn = setup();
    insert_tx(&conn, "2024-12-31", "-1", "99");
    insert_tx(&conn, "2025-06-15", "-2", "97");
    let txs = repo::transactions_in_range(&conn, 1, &DateRange::UNBOUNDED).unwrap();
    assert_eq!(txs.len(), 2);
    assert!(txs[0].date < txs[1].date);
}

#[test]
fn transactions_in_range_ignores_other_users() {
    let conn = setup();
    conn.execute("INSERT INTO users(username) VALUES('bob')", [])
        .unwrap();
    insert_tx(&conn, "2025-03-01", "-2", "98");
    conn.execute(
        "INSERT INTO transactions(user_id, date, description, transaction_type,
                                  amount, category, payment_method, merchant, balance)
         VALUES (2, '2025-03-01', 'rent', 'Debit', '-800', 'Rent', 'ACH Transfer', 'Landlord', '200')",
        [],
    )
    .unwrap();
    let txs = repo::transactions_in_range(&conn, 1, &DateRange::UNBOUNDED).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].merchant, "Cafe");
}

#[test]
fn last_n_transactions_orders_and_truncates() {
    let conn = setup();
    insert_tx(&conn, "2025-03-01", "-1", "99");
    insert_tx(&conn, "2025-03-02", "-2", "97");
    insert_tx(&conn, "2025-03-03", "-3", "94");
    let newest = repo::last_n_transactions(&conn, 1, 2, SortOrder::Descending).unwrap();
    let dates: Vec<String> = newest.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-03-03", "2025-03-02"]);
    let oldest = repo::last_n_transactions(&conn, 1, 2, SortOrder::Ascending).unwrap();
    let dates: Vec<String> = oldest.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-03-01", "2025-03-02"]);
}

#[test]
fn latest_budget_defaults_to_zero() {
    let conn = setup();
    assert_eq!(repo::latest_budget(&conn, 1).unwrap(), Decimal::ZERO);
}

#[test]
fn latest_budget_picks_newest_by_date_then_id() {
    let conn = setup();
    conn.execute(
        "INSERT INTO budgets(user_id, monthly_limit, date) VALUES (1,'500','2025-01-01')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO budgets(user_id, monthly_limit, date) VALUES (1,'750','2025-02-01')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO budgets(user_id, monthly_limit, date) VALUES (1,'600','2025-02-01')",
        [],
    )
    .unwrap();
    assert_eq!(repo::latest_budget(&conn, 1).unwrap(), dec("600"));
}

#[test]
fn add_budget_rejects_non_positive_limit() {
    let conn = setup();
    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let err = repo::add_budget(&conn, 1, Decimal::ZERO, date).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = repo::add_budget(&conn, 1, dec("-5"), date).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let id = repo::add_budget(&conn, 1, dec("250.50"), date).unwrap();
    assert_eq!(id, 1);
    assert_eq!(repo::latest_budget(&conn, 1).unwrap(), dec("250.50"));
}

#[test]
fn latest_score_defaults_to_zero() {
    let conn = setup();
    assert_eq!(repo::latest_score(&conn, 1).unwrap(), Decimal::ZERO);
}

#[test]
fn record_score_enforces_domain() {
    let conn = setup();
    assert!(matches!(
        repo::record_score(&conn, 1, dec("10.5")).unwrap_err(),
        Error::InvalidInput(_)
    ));
    assert!(matches!(
        repo::record_score(&conn, 1, dec("-0.1")).unwrap_err(),
        Error::InvalidInput(_)
    ));
    repo::record_score(&conn, 1, Decimal::ZERO).unwrap();
    repo::record_score(&conn, 1, dec("10")).unwrap();
    assert_eq!(repo::latest_score(&conn, 1).unwrap(), dec("10"));
}

#[test]
fn score_history_is_ascending_by_timestamp() {
    let conn = setup();
    conn.execute(
        "INSERT INTO spending_scores(user_id, score, updated_at) VALUES (1,'7.5','2025-02-01 10:00:00')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO spending_scores(user_id, score, updated_at) VALUES (1,'6.0','2025-01-01 10:00:00')",
        [],
    )
    .unwrap();
    let history = repo::score_history(&conn, 1).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].score, dec("6.0"));
    assert_eq!(history[1].score, dec("7.5"));
    assert!(history[0].updated_at < history[1].updated_at);
}

#[test]
fn user_overview_reads_zero_defaults() {
    let conn = setup();
    let o = repo::user_overview(&conn, "alice").unwrap();
    assert_eq!(o.user_id, 1);
    assert_eq!(o.balance, Decimal::ZERO);
    assert_eq!(o.spending_score, Decimal::ZERO);
    assert_eq!(o.monthly_limit, Decimal::ZERO);
}

#[test]
fn user_overview_reads_latest_of_each_series() {
    let conn = setup();
    insert_tx(&conn, "2025-03-01", "-10", "90");
    insert_tx(&conn, "2025-03-02", "-5", "85");
    conn.execute(
        "INSERT INTO budgets(user_id, monthly_limit, date) VALUES (1,'400','2025-03-01')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO spending_scores(user_id, score, updated_at) VALUES (1,'8.2','2025-03-01 09:00:00')",
        [],
    )
    .unwrap();
    let o = repo::user_overview(&conn, "alice").unwrap();
    assert_eq!(o.balance, dec("85"));
    assert_eq!(o.monthly_limit, dec("400"));
    assert_eq!(o.spending_score, dec("8.2"));
    assert!(matches!(
        repo::user_overview(&conn, "nobody").unwrap_err(),
        Error::NotFound(_)
    ));
}

#[test]
fn corrupted_stored_amount_is_invalid_input() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(user_id, date, description, transaction_type,
                                  amount, category, payment_method, merchant, balance)
         VALUES (1, '2025-03-01', 'bad', 'Debit', 'abc', 'Other', 'Debit Card', 'X', '0')",
        [],
    )
    .unwrap();
    let err = repo::transactions_in_range(&conn, 1, &DateRange::UNBOUNDED).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}
