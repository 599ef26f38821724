// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::db::load_raw_transactions;
use crate::insights::TransactionDataset;
use crate::utils::{bar, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{Datelike, Month, Weekday};
use rusqlite::Connection;
use serde::Serialize;

const BAR_WIDTH: usize = 30;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let dataset = TransactionDataset::build(&load_raw_transactions(conn)?);
    let (title, data) = match name {
        "monthly" => ("Month", monthly_trend(&dataset)),
        "categories" => ("Category", category_distribution(&dataset)),
        "weekdays" => ("Day", weekday_pattern(&dataset)),
        "months" => ("Month", month_of_year(&dataset)),
        _ => return Ok(()),
    };
    render(title, &data, sub)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub total: f64,
    /// Percentage of the chart total, for distribution charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<f64>,
}

impl ChartRow {
    fn new(label: impl Into<String>, total: f64) -> Self {
        Self {
            label: label.into(),
            total,
            share: None,
        }
    }
}

/// Spend per calendar month (`YYYY-MM`), oldest first.
pub fn monthly_trend(dataset: &TransactionDataset) -> Vec<ChartRow> {
    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in dataset.rows() {
        *totals.entry((r.date.year(), r.month)).or_insert(0.0) += r.amount;
    }
    totals
        .into_iter()
        .map(|((y, m), total)| ChartRow::new(format!("{:04}-{:02}", y, m), total))
        .collect()
}

pub fn category_distribution(dataset: &TransactionDataset) -> Vec<ChartRow> {
    let totals = dataset.category_totals();
    let sum: f64 = totals.values().sum();
    totals
        .into_iter()
        .map(|(name, total)| ChartRow {
            share: (sum != 0.0).then(|| total / sum * 100.0),
            ..ChartRow::new(name, total)
        })
        .collect()
}

/// Monday through Sunday, always seven rows.
pub fn weekday_pattern(dataset: &TransactionDataset) -> Vec<ChartRow> {
    let mut totals = [0.0; 7];
    for r in dataset.rows() {
        totals[r.date.weekday().num_days_from_monday() as usize] += r.amount;
    }
    let mut day = Weekday::Mon;
    totals
        .iter()
        .map(|&total| {
            let row = ChartRow::new(weekday_name(day), total);
            day = day.succ();
            row
        })
        .collect()
}

/// January through December, summed across years.
pub fn month_of_year(dataset: &TransactionDataset) -> Vec<ChartRow> {
    let mut totals = [0.0; 12];
    for r in dataset.rows() {
        totals[r.month as usize - 1] += r.amount;
    }
    totals
        .iter()
        .enumerate()
        .map(|(i, &total)| {
            let name = Month::try_from(i as u8 + 1)
                .map(|m| m.name())
                .unwrap_or("?");
            ChartRow::new(name, total)
        })
        .collect()
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn render(title: &str, data: &[ChartRow], sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let max = data.iter().map(|r| r.total).fold(0.0, f64::max);
    let with_share = data.iter().any(|r| r.share.is_some());
    let rows = data
        .iter()
        .map(|r| {
            let mut row = vec![r.label.clone(), format!("{:.2}", r.total)];
            if with_share {
                row.push(r.share.map(|s| format!("{:.1}%", s)).unwrap_or_default());
            }
            row.push(bar(r.total, max, BAR_WIDTH));
            row
        })
        .collect();
    let headers: Vec<&str> = if with_share {
        vec![title, "Total", "Share", ""]
    } else {
        vec![title, "Total", ""]
    };
    println!("{}", pretty_table(&headers, rows));
    Ok(())
}
