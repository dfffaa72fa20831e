// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::models::{ScorePoint, Transaction};
use crate::period::DateRange;

const TX_COLUMNS: &str = "transaction_id, user_id, date, description, transaction_type, \
                          amount, category, payment_method, merchant, balance";

/// Row order for ledger reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("asc"),
            SortOrder::Descending => f.write_str("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(Error::InvalidInput(format!(
                "unknown order '{}' (use asc|desc)",
                other
            ))),
        }
    }
}

/// The dashboard's one-shot user lookup: identity plus the latest score,
/// balance, and budget limit, each reading as zero when no row exists yet.
#[derive(Debug, Clone, Serialize)]
pub struct UserOverview {
    pub user_id: i64,
    pub username: String,
    pub spending_score: Decimal,
    pub balance: Decimal,
    pub monthly_limit: Decimal,
}

pub fn user_id_for(conn: &Connection, username: &str) -> Result<i64, Error> {
    let id: Option<i64> = conn
        .query_row(
            "SELECT user_id FROM users WHERE username=?1",
            params![username],
            |r| r.get(0),
        )
        .optional()
        .map_err(Error::Unavailable)?;
    id.ok_or_else(|| Error::NotFound(format!("user '{}'", username)))
}

pub fn user_overview(conn: &Connection, username: &str) -> Result<UserOverview, Error> {
    let row: Option<(i64, Option<String>, Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT u.user_id,
                    (SELECT score FROM spending_scores WHERE user_id = u.user_id
                     ORDER BY updated_at DESC LIMIT 1),
                    (SELECT balance FROM transactions WHERE user_id = u.user_id
                     ORDER BY date DESC, transaction_id DESC LIMIT 1),
                    (SELECT monthly_limit FROM budgets WHERE user_id = u.user_id
                     ORDER BY date DESC, budget_id DESC LIMIT 1)
             FROM users u WHERE u.username = ?1",
            params![username],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()
        .map_err(Error::Unavailable)?;
    let (user_id, score, balance, limit) =
        row.ok_or_else(|| Error::NotFound(format!("user '{}'", username)))?;
    Ok(UserOverview {
        user_id,
        username: username.to_string(),
        spending_score: optional_decimal(score, "score")?,
        balance: optional_decimal(balance, "balance")?,
        monthly_limit: optional_decimal(limit, "monthly_limit")?,
    })
}

/// Balance after the most recent transaction by `(date, transaction_id)`;
/// `None` for a user with an empty ledger.
pub fn latest_balance(conn: &Connection, user_id: i64) -> Result<Option<Decimal>, Error> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT balance FROM transactions WHERE user_id=?1
             ORDER BY date DESC, transaction_id DESC LIMIT 1",
            params![user_id],
            |r| r.get(0),
        )
        .optional()
        .map_err(Error::Unavailable)?;
    raw.map(|s| stored_decimal(&s, "balance")).transpose()
}

/// Transactions inside an inclusive date window, ascending by
/// `(date, transaction_id)`. Unbounded sides of the range add no filter.
pub fn transactions_in_range(
    conn: &Connection,
    user_id: i64,
    range: &DateRange,
) -> Result<Vec<Transaction>, Error> {
    let mut sql = format!("SELECT {TX_COLUMNS} FROM transactions WHERE user_id=?");
    let mut binds: Vec<String> = vec![user_id.to_string()];
    if let Some(start) = range.start {
        sql.push_str(" AND date >= ?");
        binds.push(start.to_string());
    }
    if let Some(end) = range.end {
        sql.push_str(" AND date <= ?");
        binds.push(end.to_string());
    }
    sql.push_str(" ORDER BY date ASC, transaction_id ASC");
    query_transactions(conn, &sql, &binds)
}

pub fn last_n_transactions(
    conn: &Connection,
    user_id: i64,
    n: usize,
    order: SortOrder,
) -> Result<Vec<Transaction>, Error> {
    let sql = format!(
        "SELECT {TX_COLUMNS} FROM transactions WHERE user_id=?
         ORDER BY date {o}, transaction_id {o} LIMIT ?",
        o = order.sql()
    );
    let binds = vec![user_id.to_string(), n.to_string()];
    query_transactions(conn, &sql, &binds)
}

/// Active monthly limit: the budget row with the greatest `(date,
/// budget_id)`. Zero is the explicit default when the user never set one.
pub fn latest_budget(conn: &Connection, user_id: i64) -> Result<Decimal, Error> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT monthly_limit FROM budgets WHERE user_id=?1
             ORDER BY date DESC, budget_id DESC LIMIT 1",
            params![user_id],
            |r| r.get(0),
        )
        .optional()
        .map_err(Error::Unavailable)?;
    optional_decimal(raw, "monthly_limit")
}

/// Most recently updated spending score, zero when the scorer has not run.
pub fn latest_score(conn: &Connection, user_id: i64) -> Result<Decimal, Error> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT score FROM spending_scores WHERE user_id=?1
             ORDER BY updated_at DESC LIMIT 1",
            params![user_id],
            |r| r.get(0),
        )
        .optional()
        .map_err(Error::Unavailable)?;
    optional_decimal(raw, "score")
}

pub fn score_history(conn: &Connection, user_id: i64) -> Result<Vec<ScorePoint>, Error> {
    let mut stmt = conn
        .prepare(
            "SELECT updated_at, score FROM spending_scores WHERE user_id=?1
             ORDER BY updated_at ASC",
        )
        .map_err(Error::Unavailable)?;
    let mut rows = stmt.query(params![user_id]).map_err(Error::Unavailable)?;
    let mut out = Vec::new();
    while let Some(r) = rows.next().map_err(Error::Unavailable)? {
        let at: String = r.get(0).map_err(Error::Unavailable)?;
        let score: String = r.get(1).map_err(Error::Unavailable)?;
        out.push(ScorePoint {
            updated_at: stored_datetime(&at)?,
            score: stored_decimal(&score, "score")?,
        });
    }
    Ok(out)
}

/// Appends a budget row. Budgets are immutable; setting a new limit adds a
/// row and the latest one wins.
pub fn add_budget(
    conn: &Connection,
    user_id: i64,
    monthly_limit: Decimal,
    date: NaiveDate,
) -> Result<i64, Error> {
    if monthly_limit <= Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "monthly limit must be positive, got {}",
            monthly_limit
        )));
    }
    conn.execute(
        "INSERT INTO budgets(user_id, monthly_limit, date) VALUES (?1, ?2, ?3)",
        params![user_id, monthly_limit.to_string(), date.to_string()],
    )
    .map_err(|e| Error::Persistence(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Ingestion point for the external scoring process. Scores live in
/// `[0, 10]`; anything else is refused before it reaches the store.
pub fn record_score(conn: &Connection, user_id: i64, score: Decimal) -> Result<(), Error> {
    if score < Decimal::ZERO || score > Decimal::from(10) {
        return Err(Error::InvalidInput(format!(
            "score {} outside the 0-10 domain",
            score
        )));
    }
    conn.execute(
        "INSERT INTO spending_scores(user_id, score) VALUES (?1, ?2)",
        params![user_id, score.to_string()],
    )
    .map_err(|e| Error::Persistence(e.to_string()))?;
    Ok(())
}

fn query_transactions(
    conn: &Connection,
    sql: &str,
    binds: &[String],
) -> Result<Vec<Transaction>, Error> {
    let mut stmt = conn.prepare(sql).map_err(Error::Unavailable)?;
    let bind_refs: Vec<&dyn rusqlite::ToSql> =
        binds.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
    let mut rows = stmt
        .query(rusqlite::params_from_iter(bind_refs))
        .map_err(Error::Unavailable)?;
    let mut out = Vec::new();
    while let Some(r) = rows.next().map_err(Error::Unavailable)? {
        out.push(transaction_from_row(r)?);
    }
    Ok(out)
}

fn transaction_from_row(r: &rusqlite::Row<'_>) -> Result<Transaction, Error> {
    let id: i64 = r.get(0).map_err(Error::Unavailable)?;
    let user_id: i64 = r.get(1).map_err(Error::Unavailable)?;
    let date: String = r.get(2).map_err(Error::Unavailable)?;
    let description: String = r.get(3).map_err(Error::Unavailable)?;
    let kind: String = r.get(4).map_err(Error::Unavailable)?;
    let amount: String = r.get(5).map_err(Error::Unavailable)?;
    let category: String = r.get(6).map_err(Error::Unavailable)?;
    let payment_method: String = r.get(7).map_err(Error::Unavailable)?;
    let merchant: String = r.get(8).map_err(Error::Unavailable)?;
    let balance: String = r.get(9).map_err(Error::Unavailable)?;
    Ok(Transaction {
        id,
        user_id,
        date: stored_date(&date)?,
        description,
        kind: kind.parse()?,
        amount: stored_decimal(&amount, "amount")?,
        category: category.parse()?,
        payment_method: payment_method.parse()?,
        merchant,
        balance: stored_decimal(&balance, "balance")?,
    })
}

fn stored_date(s: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::InvalidInput(format!("stored date '{}' is not YYYY-MM-DD", s)))
}

fn stored_datetime(s: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| Error::InvalidInput(format!("stored timestamp '{}' is not a datetime", s)))
}

fn stored_decimal(s: &str, what: &str) -> Result<Decimal, Error> {
    s.parse::<Decimal>()
        .map_err(|_| Error::InvalidInput(format!("stored {} '{}' is not a decimal", what, s)))
}

fn optional_decimal(v: Option<String>, what: &str) -> Result<Decimal, Error> {
    match v {
        Some(s) => stored_decimal(&s, what),
        None => Ok(Decimal::ZERO),
    }
}
