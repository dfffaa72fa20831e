// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Appends to the transaction ledger.
//!
//! Every row stores the running balance it produced, so an append must not
//! interleave with another writer between reading the old balance and
//! inserting the new row. The insert is therefore guarded: it only applies
//! while the ledger tip is still the row the balance was read from, and a
//! lost race surfaces as a persistence error instead of a silent corrupt
//! balance. Nothing here retries.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::error::Error;
use crate::models::{Category, PaymentMethod, Transaction, TransactionType};
use crate::repo;

/// One entry to append. Credits are positive, debits negative; the signed
/// amount is what moves the running balance.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionType,
    pub amount: Decimal,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub merchant: String,
}

/// Appends one entry, computing its running balance from the current
/// ledger tip. Fails with `Persistence` when another writer advanced the
/// tip first.
pub fn append(
    conn: &Connection,
    user_id: i64,
    entry: &NewTransaction,
) -> Result<Transaction, Error> {
    if entry.description.trim().is_empty() {
        return Err(Error::InvalidInput("description must not be empty".into()));
    }
    if entry.merchant.trim().is_empty() {
        return Err(Error::InvalidInput("merchant must not be empty".into()));
    }

    let tip: Option<(i64, String)> = conn
        .query_row(
            "SELECT transaction_id, balance FROM transactions WHERE user_id=?1
             ORDER BY date DESC, transaction_id DESC LIMIT 1",
            params![user_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()
        .map_err(Error::Unavailable)?;
    let (tip_id, tip_balance) = match tip {
        Some((id, raw)) => {
            let balance = raw.parse::<Decimal>().map_err(|_| {
                Error::InvalidInput(format!("stored balance '{}' is not a decimal", raw))
            })?;
            (id, balance)
        }
        None => (0, Decimal::ZERO),
    };
    let new_balance = tip_balance + entry.amount;

    // Conditional append: the WHERE clause re-checks the tip inside the
    // same statement, so the read-modify-write cannot interleave with a
    // concurrent append to the same user's ledger.
    let inserted = conn
        .execute(
            "INSERT INTO transactions(user_id, date, description, transaction_type,
                                      amount, category, payment_method, merchant, balance)
             SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9
             WHERE COALESCE((SELECT transaction_id FROM transactions WHERE user_id=?1
                             ORDER BY date DESC, transaction_id DESC LIMIT 1), 0) = ?10",
            params![
                user_id,
                entry.date.to_string(),
                entry.description,
                entry.kind.as_str(),
                entry.amount.to_string(),
                entry.category.as_str(),
                entry.payment_method.as_str(),
                entry.merchant,
                new_balance.to_string(),
                tip_id,
            ],
        )
        .map_err(|e| Error::Persistence(e.to_string()))?;
    if inserted == 0 {
        return Err(Error::Persistence(
            "ledger advanced during append, entry not written".into(),
        ));
    }

    Ok(Transaction {
        id: conn.last_insert_rowid(),
        user_id,
        date: entry.date,
        description: entry.description.clone(),
        kind: entry.kind,
        amount: entry.amount,
        category: entry.category,
        payment_method: entry.payment_method,
        merchant: entry.merchant.clone(),
        balance: new_balance,
    })
}

/// Appends a batch in submission order. Each row reads the tip the row
/// before it committed, so balances thread through the batch; a failed row
/// leaves earlier rows committed and is reported in its slot.
pub fn append_batch(
    conn: &Connection,
    user_id: i64,
    entries: &[NewTransaction],
) -> Vec<Result<Transaction, Error>> {
    entries
        .iter()
        .map(|entry| append(conn, user_id, entry))
        .collect()
}

/// Replays the running-balance chain and reports rows whose stored balance
/// does not equal the previous balance plus the row's amount. The first
/// row anchors the chain. Used by the doctor command.
pub fn audit_chain(conn: &Connection, user_id: i64) -> Result<Vec<String>, Error> {
    let txs = repo::transactions_in_range(conn, user_id, &crate::period::DateRange::UNBOUNDED)?;
    let mut issues = Vec::new();
    let mut prev: Option<Decimal> = None;
    for t in &txs {
        if let Some(prev_balance) = prev {
            let expected = prev_balance + t.amount;
            if expected != t.balance {
                issues.push(format!(
                    "transaction {} on {}: balance {} but expected {}",
                    t.id, t.date, t.balance, expected
                ));
            }
        }
        prev = Some(t.balance);
    }
    Ok(issues)
}
