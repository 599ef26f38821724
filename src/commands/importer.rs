// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_date, parse_date_flexible, parse_decimal};
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::{Connection, params};
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["amount", "category", "date"];

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .ok_or_else(|| anyhow!("--path is required"))?
                .trim();
            let summary = import_transactions(conn, path)?;
            println!(
                "Successfully added {} transactions from {}",
                summary.imported, path
            );
            if !summary.skipped.is_empty() {
                println!("The following rows had errors and were skipped:");
                for line in &summary.skipped {
                    println!("  {}", line);
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: usize,
    /// One message per rejected row, e.g. `Row 3: Invalid date format 'soon'`.
    pub skipped: Vec<String>,
}

struct Columns {
    amount: usize,
    category: usize,
    date: usize,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|&c| find(c).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(anyhow!(
                "CSV must contain: amount, category, date columns (missing: {})",
                missing.join(", ")
            ));
        }
        Ok(Self {
            amount: find("amount").unwrap_or_default(),
            category: find("category").unwrap_or_default(),
            date: find("date").unwrap_or_default(),
            description: find("description"),
        })
    }
}

struct Parsed {
    amount: String,
    category: i64,
    date: String,
    description: String,
}

fn parse_row(rec: &StringRecord, cols: &Columns) -> Result<Parsed, String> {
    let field = |i: usize| rec.get(i).unwrap_or("").trim();

    let amount_raw = field(cols.amount);
    let amount = parse_decimal(amount_raw)
        .map_err(|_| format!("Invalid data - amount '{}'", amount_raw))?;
    let category_raw = field(cols.category);
    let category = category_raw
        .parse::<i64>()
        .map_err(|_| format!("Invalid data - category '{}'", category_raw))?;
    let date_raw = field(cols.date);
    let date = parse_date(date_raw)
        .ok()
        .or_else(|| parse_date_flexible(date_raw))
        .ok_or_else(|| format!("Invalid date format '{}'", date_raw))?;
    let description = cols.description.map(field).unwrap_or("").to_string();

    Ok(Parsed {
        amount: amount.to_string(),
        category,
        date: date.to_string(),
        description,
    })
}

/// Imports every parsable row in one SQLite transaction. Bad rows are
/// skipped and reported; a missing file or header is an error.
pub fn import_transactions(conn: &mut Connection, path: &str) -> Result<ImportSummary> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;
    let cols = Columns::from_headers(rdr.headers()?)?;

    let tx = conn.transaction()?;
    let mut summary = ImportSummary::default();
    for (idx, result) in rdr.records().enumerate() {
        // header is line 1
        let row_no = idx + 2;
        let parsed = match result {
            Ok(rec) => parse_row(&rec, &cols),
            Err(err) => Err(format!("Unreadable row - {}", err)),
        };
        match parsed {
            Ok(p) => {
                tx.execute(
                    "INSERT INTO transactions(amount, category, date, description) \
                     VALUES (?1,?2,?3,?4)",
                    params![p.amount, p.category, p.date, p.description],
                )?;
                summary.imported += 1;
            }
            Err(msg) => {
                warn!(row = row_no, reason = %msg, "skipping CSV row");
                summary.skipped.push(format!("Row {}: {}", row_no, msg));
            }
        }
    }
    tx.commit()?;
    info!(
        imported = summary.imported,
        skipped = summary.skipped.len(),
        path,
        "CSV import finished"
    );
    Ok(summary)
}
