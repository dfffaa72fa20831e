// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, BalancePoint, SpendingSummary};
use crate::commands::transactions::render_table;
use crate::models::Transaction;
use crate::period::{self, Period};
use crate::repo::{self, SortOrder};
use crate::score;
use crate::utils::{as_of, fmt_money, maybe_print_json, pretty_table, resolve_user};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

const RECENT_ROWS: usize = 10;

#[derive(Serialize)]
struct Dashboard {
    username: String,
    balance: Decimal,
    spending_score: Decimal,
    tier: &'static str,
    monthly_limit: Decimal,
    window_start: String,
    window_end: String,
    #[serde(flatten)]
    summary: SpendingSummary,
    budget_remaining: Decimal,
    recent: Vec<Transaction>,
    balance_series: Vec<BalancePoint>,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let overview = repo::user_overview(conn, &username)?;
    let reference = as_of(sub)?;
    let window = period::resolve(Period::CurrentMonth, reference, None)?;
    let txs = repo::transactions_in_range(conn, overview.user_id, &window)?;
    let summary = aggregate::summarize(&txs);
    let used = aggregate::budget_utilization(overview.monthly_limit, summary.total_spent);
    let recent =
        repo::last_n_transactions(conn, overview.user_id, RECENT_ROWS, SortOrder::Descending)?;
    // The recent rows arrive newest first; the chart data re-sorts them.
    let balance_series = aggregate::balance_series(&recent);
    let tier = score::tier_for(overview.spending_score);

    let start = window.start.unwrap_or(reference).format("%d/%m/%Y").to_string();
    let end = window.end.unwrap_or(reference).format("%d/%m/%Y").to_string();
    let view = Dashboard {
        username: username.clone(),
        balance: overview.balance,
        spending_score: overview.spending_score,
        tier: tier.name(),
        monthly_limit: overview.monthly_limit,
        window_start: start.clone(),
        window_end: end.clone(),
        summary,
        budget_remaining: used.remaining,
        recent,
        balance_series,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }

    println!("User: {}", username);
    println!(
        "{}",
        pretty_table(
            &["Balance", "Spending Score", "Tier", "Monthly Budget"],
            vec![vec![
                fmt_money(&view.balance),
                format!("{}/10", view.spending_score),
                tier.name().to_string(),
                fmt_money(&view.monthly_limit),
            ]],
        )
    );
    println!("Benefits: {}", tier.benefit());

    println!("Spending for {} - {}", start, end);
    println!(
        "{}",
        pretty_table(
            &["Spent", "Income", "Net", "Budget Remaining"],
            vec![vec![
                fmt_money(&view.summary.total_spent),
                fmt_money(&view.summary.total_income),
                fmt_money(&view.summary.net),
                fmt_money(&view.budget_remaining),
            ]],
        )
    );
    if !view.summary.categories.is_empty() {
        let rows: Vec<Vec<String>> = view
            .summary
            .categories
            .iter()
            .map(|(cat, spent)| vec![cat.to_string(), fmt_money(spent)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }

    println!("Recent activity");
    println!("{}", render_table(&view.recent));
    Ok(())
}
