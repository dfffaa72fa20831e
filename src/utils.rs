// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::ArgMatches;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::{Decimal, RoundingStrategy};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Money renders at two decimal places, rounded half away from zero.
/// Stored values keep their full precision; rounding happens only here.
pub fn fmt_money(d: &Decimal) -> String {
    let r = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if r.is_sign_negative() {
        format!("-${:.2}", r.abs())
    } else {
        format!("${:.2}", r)
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Default user settings
pub fn get_default_user(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='default_user'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_default_user(conn: &Connection, username: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('default_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![username],
    )?;
    Ok(())
}

/// The username a command acts on: `--user` when given, otherwise the
/// default set via `user use`.
pub fn resolve_user(conn: &Connection, sub: &ArgMatches) -> Result<String> {
    if let Some(u) = sub.get_one::<String>("user") {
        return Ok(u.clone());
    }
    get_default_user(conn)?
        .ok_or_else(|| anyhow!("no user selected; pass --user or run 'ledgerdash user use'"))
}

/// Reference date for period resolution: `--as-of` when given, else today.
pub fn as_of(sub: &ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}
