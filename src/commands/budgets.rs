// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::period::{self, Period};
use crate::repo;
use crate::utils::{
    as_of, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, resolve_user,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    repo::add_budget(conn, user_id, limit, date)?;
    println!("Budget set: {} effective {}", fmt_money(&limit), date);
    Ok(())
}

#[derive(Serialize)]
struct BudgetStatus {
    window_start: String,
    window_end: String,
    monthly_limit: String,
    spent: String,
    remaining: String,
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let reference = as_of(sub)?;
    let window = period::resolve(Period::CurrentMonth, reference, None)?;
    let limit = repo::latest_budget(conn, user_id)?;
    let txs = repo::transactions_in_range(conn, user_id, &window)?;
    let used = aggregate::budget_utilization(limit, aggregate::total_spent(&txs));

    // CurrentMonth always resolves to a bounded window.
    let (start, end) = (window.start.unwrap_or(reference), window.end.unwrap_or(reference));
    let status = BudgetStatus {
        window_start: start.format("%d/%m/%Y").to_string(),
        window_end: end.format("%d/%m/%Y").to_string(),
        monthly_limit: used.monthly_limit.to_string(),
        spent: used.spent.to_string(),
        remaining: used.remaining.to_string(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &status)? {
        println!("Budget for {} - {}", status.window_start, status.window_end);
        let rows = vec![vec![
            fmt_money(&used.monthly_limit),
            fmt_money(&used.spent),
            fmt_money(&used.remaining),
        ]];
        println!("{}", pretty_table(&["Monthly Limit", "Spent", "Remaining"], rows));
        if used.remaining < rust_decimal::Decimal::ZERO {
            println!("Over budget by {}", fmt_money(&-used.remaining));
        }
    }
    Ok(())
}
