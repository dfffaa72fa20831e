// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, PaymentMethod, TransactionType};
use crate::repo;
use crate::utils::{parse_date, parse_decimal, resolve_user};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Statement-style import: rows carry their own Balance column and are
/// stored as given, in file order. One bad row rolls back the whole file.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let path = sub.get_one::<String>("file").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let cols = Columns::from_headers(rdr.headers()?)?;
    let tx = conn.transaction()?;
    let mut imported = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = result.with_context(|| format!("line {}", line))?;
        let date = parse_date(cols.field(&rec, cols.date).trim())
            .with_context(|| format!("line {}", line))?;
        let description = cols.field(&rec, cols.description).trim().to_string();
        let kind: TransactionType = cols
            .field(&rec, cols.kind)
            .trim()
            .parse()
            .with_context(|| format!("line {}", line))?;
        let amount = parse_decimal(cols.field(&rec, cols.amount).trim())
            .with_context(|| format!("line {}", line))?;
        let category: Category = cols
            .field(&rec, cols.category)
            .trim()
            .parse()
            .with_context(|| format!("line {}", line))?;
        let method: PaymentMethod = cols
            .field(&rec, cols.method)
            .trim()
            .parse()
            .with_context(|| format!("line {}", line))?;
        let merchant = cols.field(&rec, cols.merchant).trim().to_string();
        let balance = parse_decimal(cols.field(&rec, cols.balance).trim())
            .with_context(|| format!("line {}", line))?;

        tx.execute(
            "INSERT INTO transactions(user_id, date, description, transaction_type,
                                      amount, category, payment_method, merchant, balance)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
            params![
                user_id,
                date.to_string(),
                description,
                kind.as_str(),
                amount.to_string(),
                category.as_str(),
                method.as_str(),
                merchant,
                balance.to_string()
            ],
        )?;
        imported += 1;
    }
    tx.commit()?;
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}

/// Column positions resolved from the header row by name, so column order
/// in the file does not matter.
struct Columns {
    date: usize,
    description: usize,
    kind: usize,
    amount: usize,
    category: usize,
    method: usize,
    merchant: usize,
    balance: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let col = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .with_context(|| format!("CSV misses required column '{}'", name))
        };
        Ok(Columns {
            date: col("Date")?,
            description: col("Description")?,
            kind: col("Transaction Type")?,
            amount: col("Amount")?,
            category: col("Category")?,
            method: col("Payment Method")?,
            merchant: col("Merchant")?,
            balance: col("Balance")?,
        })
    }

    fn field<'a>(&self, rec: &'a StringRecord, idx: usize) -> &'a str {
        rec.get(idx).unwrap_or("")
    }
}
