// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::period::{self, Period};
use crate::repo;
use crate::utils::{as_of, resolve_user};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// CSV exports use the import column layout, so a file written here can be
/// fed straight back to `import transactions`.
fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let period: Period = sub.get_one::<String>("period").unwrap().parse()?;
    let year = sub.get_one::<i32>("year").copied();
    let range = period::resolve(period, as_of(sub)?, year)?;

    let txs = repo::transactions_in_range(conn, user_id, &range)?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "Date",
                "Description",
                "Transaction Type",
                "Amount",
                "Category",
                "Payment Method",
                "Merchant",
                "Balance",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.date.to_string(),
                    t.description.clone(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.category.to_string(),
                    t.payment_method.to_string(),
                    t.merchant.clone(),
                    t.balance.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&txs)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
