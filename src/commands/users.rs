// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo;
use crate::utils::{maybe_print_json, pretty_table, set_default_user};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("use", sub)) => set_default(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").unwrap();
    if username.trim().is_empty() {
        bail!("username must not be empty");
    }
    conn.execute(
        "INSERT INTO users(username) VALUES (?1)",
        params![username],
    )?;
    println!("Added user '{}'", username);
    Ok(())
}

#[derive(Serialize)]
struct UserRow {
    username: String,
    created_at: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut stmt = conn.prepare("SELECT username, created_at FROM users ORDER BY username")?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(UserRow {
            username: r.get(0)?,
            created_at: r.get(1)?,
        });
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|u| vec![u.username.clone(), u.created_at.clone()])
            .collect();
        println!("{}", pretty_table(&["Username", "Created"], rows));
    }
    Ok(())
}

fn set_default(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").unwrap();
    repo::user_id_for(conn, username)?;
    set_default_user(conn, username)?;
    println!("Default user is now '{}'", username);
    Ok(())
}
