// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerdash::{cli, commands, utils};
use rusqlite::Connection;

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
    conn
}

fn dispatch(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["ledgerdash"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    match matches.subcommand() {
        Some(("user", sub)) => commands::users::handle(conn, sub),
        Some(("tx", sub)) => commands::transactions::handle(conn, sub),
        Some(("budget", sub)) => commands::budgets::handle(conn, sub),
        Some(("score", sub)) => commands::scores::handle(conn, sub),
        Some(("dashboard", sub)) => commands::dashboard::handle(conn, sub),
        Some(("report", sub)) => commands::reports::handle(conn, sub),
        Some(("doctor", sub)) => commands::doctor::handle(conn, sub),
        _ => panic!("unhandled subcommand"),
    }
}

#[test]
fn user_add_then_use_sets_the_default() {
    let mut conn = setup();
    dispatch(&mut conn, &["user", "add", "carol"]).unwrap();
    dispatch(&mut conn, &["user", "use", "carol"]).unwrap();
    assert_eq!(
        utils::get_default_user(&conn).unwrap().as_deref(),
        Some("carol")
    );
}

#[test]
fn user_use_rejects_unknown_user() {
    let mut conn = setup();
    let err = dispatch(&mut conn, &["user", "use", "nobody"]).unwrap_err();
    assert!(err.to_string().contains("nobody"));
    assert_eq!(utils::get_default_user(&conn).unwrap(), None);
}

#[test]
fn tx_add_uses_the_default_user_when_no_flag() {
    let mut conn = setup();
    dispatch(&mut conn, &["user", "add", "carol"]).unwrap();
    dispatch(&mut conn, &["user", "use", "carol"]).unwrap();
    dispatch(
        &mut conn,
        &[
            "tx",
            "add",
            "--date",
            "2025-03-01",
            "--description",
            "Paycheck",
            "--type",
            "Credit",
            "--amount",
            "2500",
            "--category",
            "Salary",
            "--method",
            "Direct Deposit",
            "--merchant",
            "Employer",
        ],
    )
    .unwrap();
    let (user_id, balance): (i64, String) = conn
        .query_row("SELECT user_id, balance FROM transactions", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(user_id, 1);
    assert_eq!(balance, "2500");
}

#[test]
fn tx_add_without_any_user_fails() {
    let mut conn = setup();
    let err = dispatch(
        &mut conn,
        &[
            "tx",
            "add",
            "--date",
            "2025-03-01",
            "--description",
            "x",
            "--type",
            "Debit",
            "--amount",
            "-1",
            "--category",
            "Other",
            "--method",
            "Debit Card",
            "--merchant",
            "Shop",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("no user selected"));
}

#[test]
fn tx_add_rejects_unknown_labels() {
    let mut conn = setup();
    dispatch(&mut conn, &["user", "add", "carol"]).unwrap();
    let err = dispatch(
        &mut conn,
        &[
            "tx",
            "add",
            "--user",
            "carol",
            "--date",
            "2025-03-01",
            "--description",
            "x",
            "--type",
            "Debit",
            "--amount",
            "-1",
            "--category",
            "Snacks",
            "--method",
            "Debit Card",
            "--merchant",
            "Shop",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown category"));
}

#[test]
fn budget_set_records_latest_limit() {
    let mut conn = setup();
    dispatch(&mut conn, &["user", "add", "carol"]).unwrap();
    dispatch(
        &mut conn,
        &["budget", "set", "--user", "carol", "--limit", "400", "--date", "2025-01-01"],
    )
    .unwrap();
    dispatch(
        &mut conn,
        &["budget", "set", "--user", "carol", "--limit", "650", "--date", "2025-02-01"],
    )
    .unwrap();
    assert_eq!(
        ledgerdash::repo::latest_budget(&conn, 1).unwrap(),
        "650".parse().unwrap()
    );
}

#[test]
fn budget_set_rejects_zero_limit() {
    let mut conn = setup();
    dispatch(&mut conn, &["user", "add", "carol"]).unwrap();
    let err = dispatch(
        &mut conn,
        &["budget", "set", "--user", "carol", "--limit", "0"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("must be positive"));
}

#[test]
fn score_record_validates_domain_at_the_cli() {
    let mut conn = setup();
    dispatch(&mut conn, &["user", "add", "carol"]).unwrap();
    dispatch(
        &mut conn,
        &["score", "record", "--user", "carol", "--score", "8.5"],
    )
    .unwrap();
    let err = dispatch(
        &mut conn,
        &["score", "record", "--user", "carol", "--score", "11"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("0-10"));
    assert_eq!(
        ledgerdash::repo::latest_score(&conn, 1).unwrap(),
        "8.5".parse().unwrap()
    );
}

#[test]
fn dashboard_and_report_run_against_seeded_data() {
    let mut conn = setup();
    dispatch(&mut conn, &["user", "add", "carol"]).unwrap();
    dispatch(&mut conn, &["user", "use", "carol"]).unwrap();
    for (date, kind, amount, category, method, merchant) in [
        ("2025-03-01", "Credit", "3000", "Salary", "Direct Deposit", "Employer"),
        ("2025-03-05", "Debit", "-1200", "Rent", "ACH Transfer", "Landlord"),
        ("2025-03-09", "Debit", "-80.40", "Groceries", "Debit Card", "Market"),
    ] {
        dispatch(
            &mut conn,
            &[
                "tx", "add", "--date", date, "--description", "entry", "--type", kind,
                "--amount", amount, "--category", category, "--method", method,
                "--merchant", merchant,
            ],
        )
        .unwrap();
    }
    dispatch(&mut conn, &["budget", "set", "--limit", "2000", "--date", "2025-03-01"]).unwrap();
    dispatch(&mut conn, &["score", "record", "--score", "7.2"]).unwrap();

    dispatch(&mut conn, &["dashboard", "--as-of", "2025-03-15", "--json"]).unwrap();
    dispatch(
        &mut conn,
        &["report", "spending", "--period", "year", "--year", "2025", "--json"],
    )
    .unwrap();
    dispatch(&mut conn, &["doctor"]).unwrap();

    assert_eq!(
        ledgerdash::repo::latest_balance(&conn, 1).unwrap(),
        Some("1719.60".parse().unwrap())
    );
}

#[test]
fn doctor_rejects_unknown_user_flag() {
    let mut conn = setup();
    let err = dispatch(&mut conn, &["doctor", "--user", "ghost"]).unwrap_err();
    assert!(err.to_string().contains("ghost"));
}
