// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::load_raw_transactions;
use crate::insights::InsightEngine;
use crate::utils::{get_currency_symbol, parse_date};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let today = match m.get_one::<String>("today") {
        Some(s) => parse_date(s.trim())?,
        None => Local::now().date_naive(),
    };
    let insights = generate(conn, today)?;
    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        println!("{}", insights.join("\n\n"));
    }
    Ok(())
}

/// Builds a fresh engine over the current store snapshot.
pub fn generate(conn: &Connection, today: NaiveDate) -> Result<Vec<String>> {
    let raw = load_raw_transactions(conn)?;
    let engine = InsightEngine::new(&raw, today).with_currency_symbol(get_currency_symbol(conn)?);
    let insights = engine.generate_insights();
    info!(
        rows = engine.dataset().len(),
        insights = insights.len(),
        "insights generated"
    );
    Ok(insights)
}
