// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::repo;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let mut rows = Vec::new();

    let users: Vec<(i64, String)> = match m.get_one::<String>("user") {
        Some(u) => vec![(repo::user_id_for(conn, u)?, u.clone())],
        None => {
            let mut stmt = conn.prepare("SELECT user_id, username FROM users ORDER BY user_id")?;
            let mut cur = stmt.query([])?;
            let mut all = Vec::new();
            while let Some(r) = cur.next()? {
                all.push((r.get::<_, i64>(0)?, r.get::<_, String>(1)?));
            }
            all
        }
    };
    let today = chrono::Utc::now().date_naive();

    for (user_id, username) in &users {
        // 1) Running-balance chain breaks (backdated appends, hand edits)
        match ledger::audit_chain(conn, *user_id) {
            Ok(issues) => {
                for issue in issues {
                    rows.push(vec!["balance_chain".into(), format!("{}: {}", username, issue)]);
                }
            }
            Err(e) => rows.push(vec!["unreadable_rows".into(), format!("{}: {}", username, e)]),
        }

        // 2) Future-dated transactions
        let mut stmt = conn.prepare(
            "SELECT transaction_id, date FROM transactions WHERE user_id=?1 AND date > ?2",
        )?;
        let mut cur = stmt.query((user_id, today.to_string()))?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let d: String = r.get(1)?;
            rows.push(vec![
                "future_date".into(),
                format!("{}: transaction {} dated {}", username, id, d),
            ]);
        }

        // 3) Scores outside the 0-10 domain or unparseable
        let mut stmt = conn.prepare(
            "SELECT score, updated_at FROM spending_scores WHERE user_id=?1 ORDER BY updated_at",
        )?;
        let mut cur = stmt.query([user_id])?;
        while let Some(r) = cur.next()? {
            let raw: String = r.get(0)?;
            let at: String = r.get(1)?;
            match raw.parse::<Decimal>() {
                Ok(s) if s >= Decimal::ZERO && s <= Decimal::from(10) => {}
                Ok(s) => rows.push(vec![
                    "score_domain".into(),
                    format!("{}: score {} at {}", username, s, at),
                ]),
                Err(_) => rows.push(vec![
                    "score_unreadable".into(),
                    format!("{}: '{}' at {}", username, raw, at),
                ]),
            }
        }

        // 4) Non-positive budget limits
        let mut stmt = conn.prepare(
            "SELECT budget_id, monthly_limit FROM budgets WHERE user_id=?1 ORDER BY budget_id",
        )?;
        let mut cur = stmt.query([user_id])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let raw: String = r.get(1)?;
            match raw.parse::<Decimal>() {
                Ok(l) if l > Decimal::ZERO => {}
                Ok(l) => rows.push(vec![
                    "budget_limit".into(),
                    format!("{}: budget {} has limit {}", username, id, l),
                ]),
                Err(_) => rows.push(vec![
                    "budget_unreadable".into(),
                    format!("{}: budget {} limit '{}'", username, id, raw),
                ]),
            }
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
