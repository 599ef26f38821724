// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod doctor;
pub mod importer;
pub mod insights;
pub mod reports;
pub mod settings;
pub mod transactions;

use anyhow::Result;
use rusqlite::Connection;

use crate::{cli, db};

/// Runs the selected subcommand. `open` is only called for subcommands that
/// read or write the store, so `category list` never creates a database.
pub fn dispatch<F>(matches: &clap::ArgMatches, open: F) -> Result<()>
where
    F: FnOnce() -> Result<Connection>,
{
    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };
    if name == "category" {
        return categories::handle(sub);
    }

    let mut conn = open()?;
    match name {
        "init" => println!("Database initialized at {}", db::db_path()?.display()),
        "tx" => transactions::handle(&conn, sub)?,
        "import" => importer::handle(&mut conn, sub)?,
        "insights" => insights::handle(&conn, sub)?,
        "report" => reports::handle(&conn, sub)?,
        "doctor" => doctor::handle(&conn)?,
        "settings" => settings::handle(&conn, sub)?,
        _ => {}
    }
    Ok(())
}
