// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo;
use crate::score;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table, resolve_user};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("record", sub)) => record(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("history", sub)) => history(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn record(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let value = parse_decimal(sub.get_one::<String>("score").unwrap())?;
    repo::record_score(conn, user_id, value)?;
    println!("Score {} recorded for '{}'", value, username);
    Ok(())
}

#[derive(Serialize)]
struct ScoreView {
    score: String,
    tier: &'static str,
    benefit: &'static str,
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let current = score::current_score(conn, user_id)?;
    let tier = score::tier_for(current);
    let view = ScoreView {
        score: current.to_string(),
        tier: tier.name(),
        benefit: tier.benefit(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        println!(
            "{}",
            pretty_table(
                &["Score", "Tier"],
                vec![vec![format!("{}/10", current), tier.name().to_string()]],
            )
        );
        println!("Benefits: {}", tier.benefit());
    }
    Ok(())
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = resolve_user(conn, sub)?;
    let user_id = repo::user_id_for(conn, &username)?;
    let points = score::history(conn, user_id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        let rows: Vec<Vec<String>> = points
            .iter()
            .map(|p| {
                vec![
                    p.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    p.score.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Updated", "Score"], rows));
    }
    Ok(())
}
