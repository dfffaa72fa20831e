// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerdash::repo;
use ledgerdash::score::{self, Tier};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE users(
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE
        );
        CREATE TABLE spending_scores(
            user_id INTEGER NOT NULL,
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

#[test]
fn tier_breakpoints_resolve_unambiguously() {
    assert_eq!(score::tier_for(dec("0")), Tier::Base);
    assert_eq!(score::tier_for(dec("3.99")), Tier::Base);
    assert_eq!(score::tier_for(dec("4")), Tier::Bronze);
    assert_eq!(score::tier_for(dec("6.99")), Tier::Bronze);
    assert_eq!(score::tier_for(dec("7")), Tier::Silver);
    assert_eq!(score::tier_for(dec("8.99")), Tier::Silver);
    assert_eq!(score::tier_for(dec("9")), Tier::Gold);
    assert_eq!(score::tier_for(dec("10")), Tier::Gold);
}

#[test]
fn tier_benefits_accumulate() {
    let bronze = Tier::Bronze.benefit();
    let silver = Tier::Silver.benefit();
    let gold = Tier::Gold.benefit();
    assert!(bronze.contains(Tier::Base.benefit()));
    assert!(silver.contains("1% cashback"));
    assert!(silver.contains("2x reward points"));
    assert!(gold.contains("2x reward points"));
    assert!(gold.contains("5% cashback"));
    assert_eq!(score::tier_benefit(dec("7.5")), silver);
}

#[test]
fn current_score_defaults_to_zero() {
    let conn = setup();
    assert_eq!(score::current_score(&conn, 1).unwrap(), Decimal::ZERO);
    assert_eq!(score::tier_for(score::current_score(&conn, 1).unwrap()), Tier::Base);
}

#[test]
fn recorded_scores_read_back_latest_first() {
    let conn = setup();
    conn.execute(
        "INSERT INTO spending_scores(user_id, score, updated_at) VALUES (1,'5.5','2025-01-01 08:00:00')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO spending_scores(user_id, score, updated_at) VALUES (1,'9.1','2025-02-01 08:00:00')",
        [],
    )
    .unwrap();
    assert_eq!(score::current_score(&conn, 1).unwrap(), dec("9.1"));
    let history = score::history(&conn, 1).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].score, dec("5.5"));
}

#[test]
fn ingestion_and_read_share_the_domain_check() {
    let conn = setup();
    repo::record_score(&conn, 1, dec("7")).unwrap();
    let current = score::current_score(&conn, 1).unwrap();
    assert_eq!(current, dec("7"));
    assert_eq!(score::tier_for(current), Tier::Silver);
}
