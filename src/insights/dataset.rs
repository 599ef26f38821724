// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Category, RawDate, RawTransaction};
use crate::utils::parse_date_flexible;

#[derive(Debug, Error)]
enum RecordError {
    #[error("invalid amount '{0}'")]
    Amount(String),
    #[error("invalid category '{0}'")]
    Category(String),
    #[error("invalid date '{0}'")]
    Date(String),
}

/// A parsed transaction with its calendar fields precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTransaction {
    pub amount: f64,
    pub category: i64,
    pub date: NaiveDate,
    pub description: String,
    pub iso_week: u32,
    pub iso_year: i32,
    pub month: u32,
    /// `None` when the code is outside the fixed enumeration.
    pub category_name: Option<&'static str>,
}

/// Clean, typed view over a transaction log.
///
/// Rows keep the order they were supplied in. The trend analysis reads
/// consecutive rows, so the same records in a different order can predict
/// differently.
#[derive(Debug, Clone, Default)]
pub struct TransactionDataset {
    rows: Vec<NormalizedTransaction>,
}

impl TransactionDataset {
    /// Normalizes raw records, skipping (with a warning) any whose amount, category
    /// or date cannot be parsed.
    pub fn build(raw: &[RawTransaction]) -> Self {
        let mut rows = Vec::with_capacity(raw.len());
        for (idx, record) in raw.iter().enumerate() {
            match normalize(record) {
                Ok(row) => rows.push(row),
                Err(err) => warn!(record = idx, error = %err, "skipping invalid transaction"),
            }
        }
        debug!(kept = rows.len(), dropped = raw.len() - rows.len(), "dataset built");
        Self { rows }
    }

    pub fn rows(&self) -> &[NormalizedTransaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_amount(&self) -> f64 {
        self.rows.iter().map(|r| r.amount).sum()
    }

    /// Spend per ISO week for rows whose ISO year is `year`.
    pub fn weekly_totals(&self, year: i32) -> BTreeMap<u32, f64> {
        let mut totals = BTreeMap::new();
        for row in self.rows.iter().filter(|r| r.iso_year == year) {
            *totals.entry(row.iso_week).or_insert(0.0) += row.amount;
        }
        totals
    }

    /// Spend per category name, alphabetical. Rows with unmapped codes are
    /// left out of every group.
    pub fn category_totals(&self) -> BTreeMap<&'static str, f64> {
        let mut totals = BTreeMap::new();
        for row in &self.rows {
            if let Some(name) = row.category_name {
                *totals.entry(name).or_insert(0.0) += row.amount;
            }
        }
        totals
    }
}

fn normalize(record: &RawTransaction) -> Result<NormalizedTransaction, RecordError> {
    let amount = record
        .amount
        .trim()
        .parse::<Decimal>()
        .ok()
        .and_then(|d| d.to_f64())
        .ok_or_else(|| RecordError::Amount(record.amount.clone()))?;
    let category = record
        .category
        .trim()
        .parse::<i64>()
        .map_err(|_| RecordError::Category(record.category.clone()))?;
    let date = match &record.date {
        RawDate::Date(d) => *d,
        RawDate::Text(s) => parse_date_flexible(s).ok_or_else(|| RecordError::Date(s.clone()))?,
    };
    let iso = date.iso_week();
    Ok(NormalizedTransaction {
        amount,
        category,
        date,
        description: record.description.clone().unwrap_or_default(),
        iso_week: iso.week(),
        iso_year: iso.year(),
        month: date.month(),
        category_name: Category::from_code(category).map(Category::name),
    })
}
