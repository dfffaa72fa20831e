// Copyright (c) 2025 Ledgerdash Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .value_name("USERNAME")
        .help("Act as this user instead of the default")
}

fn as_of_arg() -> Arg {
    Arg::new("as-of")
        .long("as-of")
        .value_name("YYYY-MM-DD")
        .help("Resolve periods against this date instead of today")
}

fn period_args() -> [Arg; 2] {
    [
        Arg::new("period")
            .long("period")
            .value_name("PERIOD")
            .value_parser(["all", "current-month", "last-month", "last-year", "year"])
            .default_value("all")
            .help("Date window to read"),
        Arg::new("year")
            .long("year")
            .value_name("YYYY")
            .value_parser(value_parser!(i32))
            .help("Calendar year, required when --period year"),
    ]
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON lines"),
    ]
}

pub fn build_cli() -> Command {
    command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("init").about("Create the database if it does not exist"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Register a new user")
                        .arg(Arg::new("username").required(true)),
                )
                .subcommand(Command::new("list").about("List users").args(json_args()))
                .subcommand(
                    Command::new("use")
                        .about("Set the default user for later commands")
                        .arg(Arg::new("username").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Append one transaction to the ledger")
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Transaction date, defaults to today"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .required(true)
                                .help("Credit, Debit or Transfer"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true)
                                .help("Signed amount; credits positive, debits negative"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("method")
                                .long("method")
                                .value_name("METHOD")
                                .required(true),
                        )
                        .arg(Arg::new("merchant").long("merchant").required(true))
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("batch")
                        .about("Append several rows from a CSV, reporting each row on its own")
                        .arg(Arg::new("file").long("file").required(true))
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions")
                        .args(period_args())
                        .arg(as_of_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_name("N")
                                .value_parser(value_parser!(usize))
                                .help("Show only the N first/last rows instead of a period"),
                        )
                        .arg(
                            Arg::new("order")
                                .long("order")
                                .value_parser(["asc", "desc"])
                                .default_value("desc")
                                .help("Row order when --limit is used"),
                        )
                        .arg(user_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Set and inspect the monthly budget")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set")
                        .about("Set a new monthly spending limit")
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Effective date, defaults to today"),
                        )
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the active budget and this month's utilization")
                        .arg(as_of_arg())
                        .arg(user_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("score")
                .about("Spending score readings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("record")
                        .about("Record a score produced by the scoring process")
                        .arg(Arg::new("score").long("score").required(true))
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the current score and reward tier")
                        .arg(user_arg())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("history")
                        .about("Show every recorded score, oldest first")
                        .arg(user_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Current-month overview: balance, score, budget and recent activity")
                .arg(as_of_arg())
                .arg(user_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views over a period")
                .subcommand_required(true)
                .subcommand(
                    Command::new("spending")
                        .about("Spending summary with per-category breakdown")
                        .args(period_args())
                        .arg(as_of_arg())
                        .arg(user_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Bulk import")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Import transactions from a CSV, all rows or none")
                        .arg(Arg::new("file").long("file").required(true))
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Bulk export")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions to CSV or JSON")
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .args(period_args())
                        .arg(as_of_arg())
                        .arg(user_arg()),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Audit stored data for broken balance chains and bad values")
                .arg(user_arg()),
        )
}
