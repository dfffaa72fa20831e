// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, BalancePoint};
use crate::models::Category;
use crate::period::{self, Period};
use crate::repo;
use crate::utils::{as_of, fmt_money, maybe_print_json, pretty_table, resolve_user};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spending", sub)) => spending(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct SpendingReport {
    period: String,
    start: Option<String>,
    end: Option<String>,
    total_spent: Decimal,
    total_income: Decimal,
    net: Decimal,
    categories: Vec<(Category, Decimal)>,
    balance_series: Vec<BalancePoint>,
}

fn spending(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let period: Period = sub.get_one::<String>("period").unwrap().parse()?;
    let year = sub.get_one::<i32>("year").copied();
    let range = period::resolve(period, as_of(sub)?, year)?;

    let txs = repo::transactions_in_range(conn, user_id, &range)?;
    let summary = aggregate::summarize(&txs);
    let series = aggregate::balance_series(&txs);

    // Heaviest categories first, the way the breakdown chart orders them.
    let mut categories: Vec<(Category, Decimal)> = summary.categories.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1));

    let report = SpendingReport {
        period: period.to_string(),
        start: range.start.map(|d| d.to_string()),
        end: range.end.map(|d| d.to_string()),
        total_spent: summary.total_spent,
        total_income: summary.total_income,
        net: summary.net,
        categories,
        balance_series: series,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    match (&report.start, &report.end) {
        (Some(s), Some(e)) => println!("Spending report ({}) {} - {}", report.period, s, e),
        _ => println!("Spending report ({})", report.period),
    }
    println!(
        "{}",
        pretty_table(
            &["Spent", "Income", "Net"],
            vec![vec![
                fmt_money(&report.total_spent),
                fmt_money(&report.total_income),
                fmt_money(&report.net),
            ]],
        )
    );
    let rows: Vec<Vec<String>> = report
        .categories
        .iter()
        .map(|(cat, amt)| vec![cat.to_string(), fmt_money(amt)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}
