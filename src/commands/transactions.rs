// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::load_transactions;
use crate::models::Category;
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, parse_date, pretty_table};
use anyhow::{Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("clear", sub)) => clear(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// A transaction that passed the add-form checks.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub description: String,
}

pub fn validate(
    amount: &str,
    category: &str,
    date: &str,
    description: Option<&str>,
    today: NaiveDate,
) -> Result<NewTransaction> {
    let amount = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|_| anyhow!("Invalid amount '{}'", amount.trim()))?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be positive");
    }
    let category = category
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(Category::from_code)
        .ok_or_else(|| anyhow!("Select a valid category (1-8, see `category list`)"))?;
    let date = parse_date(date.trim()).map_err(|_| anyhow!("Use YYYY-MM-DD date format"))?;
    if date > today {
        bail!("Date cannot be in future");
    }
    Ok(NewTransaction {
        amount,
        category,
        date,
        description: description.unwrap_or("").trim().to_string(),
    })
}

pub fn insert(conn: &Connection, t: &NewTransaction) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(amount, category, date, description) VALUES (?1, ?2, ?3, ?4)",
        params![
            t.amount.to_string(),
            t.category.code(),
            t.date.to_string(),
            t.description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let t = validate(
        sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""),
        sub.get_one::<String>("category").map(String::as_str).unwrap_or(""),
        sub.get_one::<String>("date").map(String::as_str).unwrap_or(""),
        sub.get_one::<String>("description").map(String::as_str),
        today,
    )?;
    let id = insert(conn, &t)?;
    info!(id, "transaction recorded");
    let symbol = get_currency_symbol(conn)?;
    println!(
        "Recorded {} for {} on {} (id {})",
        fmt_money(t.amount.to_f64().unwrap_or(0.0), &symbol),
        t.category.name(),
        t.date,
        id
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(load_transactions(conn)?
        .into_iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id,
            category: t.category_name().to_string(),
            date: t.date,
            amount: t.amount,
            description: t.description,
        })
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow!("--id is required"))?;
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Transaction {} not found", id);
    }
    info!(id, "transaction deleted");
    println!("Deleted transaction {}", id);
    Ok(())
}

fn clear(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("Refusing to delete all transactions without --yes");
    }
    let n = conn.execute("DELETE FROM transactions", [])?;
    info!(deleted = n, "transactions cleared");
    println!("Deleted {} transactions", n);
    Ok(())
}
