// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, NewTransaction};
use crate::models::Transaction;
use crate::period::Period;
use crate::repo::{self, SortOrder};
use crate::utils::{
    as_of, fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, resolve_user,
};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("batch", sub)) => batch(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let entry = NewTransaction {
        date,
        description: sub.get_one::<String>("description").unwrap().clone(),
        kind: sub.get_one::<String>("type").unwrap().parse()?,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        category: sub.get_one::<String>("category").unwrap().parse()?,
        payment_method: sub.get_one::<String>("method").unwrap().parse()?,
        merchant: sub.get_one::<String>("merchant").unwrap().clone(),
    };
    let tx = ledger::append(conn, user_id, &entry)?;
    println!(
        "Recorded {} on {} at '{}' (balance: {})",
        tx.amount,
        tx.date,
        tx.merchant,
        fmt_money(&tx.balance)
    );
    Ok(())
}

/// Batch rows carry no Balance column; the writer threads balances through
/// the batch itself. Rows succeed or fail one by one.
fn batch(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let path = sub.get_one::<String>("file").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let headers = rdr.headers()?.clone();
    let col = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("CSV misses required column '{}'", name))
    };
    let c_date = col("Date")?;
    let c_desc = col("Description")?;
    let c_type = col("Transaction Type")?;
    let c_amount = col("Amount")?;
    let c_category = col("Category")?;
    let c_method = col("Payment Method")?;
    let c_merchant = col("Merchant")?;

    let mut recorded = 0usize;
    let mut failed = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                failed += 1;
                println!("line {}: FAILED: {}", line, e);
                continue;
            }
        };
        let parsed: Result<NewTransaction> = (|| {
            Ok(NewTransaction {
                date: parse_date(rec.get(c_date).unwrap_or("").trim())?,
                description: rec.get(c_desc).unwrap_or("").trim().to_string(),
                kind: rec.get(c_type).unwrap_or("").trim().parse()?,
                amount: parse_decimal(rec.get(c_amount).unwrap_or("").trim())?,
                category: rec.get(c_category).unwrap_or("").trim().parse()?,
                payment_method: rec.get(c_method).unwrap_or("").trim().parse()?,
                merchant: rec.get(c_merchant).unwrap_or("").trim().to_string(),
            })
        })();
        match parsed.and_then(|entry| Ok(ledger::append(conn, user_id, &entry)?)) {
            Ok(tx) => {
                recorded += 1;
                println!(
                    "line {}: recorded {} at '{}' (balance: {})",
                    line,
                    tx.amount,
                    tx.merchant,
                    fmt_money(&tx.balance)
                );
            }
            Err(e) => {
                failed += 1;
                println!("line {}: FAILED: {}", line, e);
            }
        }
    }
    println!("Batch done: {} recorded, {} failed", recorded, failed);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;

    let data = if let Some(n) = sub.get_one::<usize>("limit") {
        let order: SortOrder = sub.get_one::<String>("order").unwrap().parse()?;
        repo::last_n_transactions(conn, user_id, *n, order)?
    } else {
        let period: Period = sub.get_one::<String>("period").unwrap().parse()?;
        let year = sub.get_one::<i32>("year").copied();
        let range = crate::period::resolve(period, as_of(sub)?, year)?;
        repo::transactions_in_range(conn, user_id, &range)?
    };

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", render_table(&data));
    }
    Ok(())
}

pub fn render_table(data: &[Transaction]) -> comfy_table::Table {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.to_string(),
                t.kind.to_string(),
                t.description.clone(),
                t.category.to_string(),
                t.payment_method.to_string(),
                t.merchant.clone(),
                fmt_money(&t.amount),
                fmt_money(&t.balance),
            ]
        })
        .collect();
    pretty_table(
        &[
            "ID",
            "Date",
            "Type",
            "Description",
            "Category",
            "Method",
            "Merchant",
            "Amount",
            "Balance",
        ],
        rows,
    )
}

