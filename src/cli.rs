// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON document per line"),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and manage transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a spending transaction")
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Category code (see `category list`)"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("YYYY-MM-DD, not in the future"),
                )
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List transactions, newest first").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize)),
            ),
        ))
        .subcommand(
            Command::new("rm").about("Delete one transaction").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("clear").about("Delete every transaction").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm deleting all transactions"),
            ),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Spending charts as tables")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("monthly").about("Total spend per calendar month"),
        ))
        .subcommand(json_flags(
            Command::new("categories").about("Spend distribution by category"),
        ))
        .subcommand(json_flags(
            Command::new("weekdays").about("Spend per day of the week"),
        ))
        .subcommand(json_flags(
            Command::new("months").about("Spend per month of the year"),
        ))
}

pub fn build_cli() -> Command {
    command!()
        .name("moneylens")
        .about("Track spending and get plain-language insights")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(tx_cmd())
        .subcommand(
            Command::new("import")
                .about("Import data from files")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Import a CSV with amount, category, date[, description] columns")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("insights")
                .about("Generate spending insights")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print insights as a JSON array"),
                )
                .arg(
                    Arg::new("today")
                        .long("today")
                        .help("Reference date (YYYY-MM-DD); defaults to the local date"),
                ),
        )
        .subcommand(report_cmd())
        .subcommand(
            Command::new("category")
                .about("Spending categories")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List category codes")),
        )
        .subcommand(Command::new("doctor").about("Report stored rows that insights would skip"))
        .subcommand(
            Command::new("settings")
                .about("Show or change settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency")
                        .about("Currency symbol used in messages")
                        .arg(Arg::new("symbol").long("symbol").required(true)),
                ),
        )
}
