// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns a transaction log into a short, ordered list of readable
//! observations about spending.
//!
//! Every analysis runs on its own: a failure in one is logged and simply
//! contributes nothing, so callers always get a (possibly shorter) list back.

pub mod budget;
pub mod categories;
pub mod clustering;
pub mod dataset;
pub mod kmeans;
pub mod tree;
pub mod trend;
pub mod weekly;

use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::RawTransaction;
use crate::utils::DEFAULT_CURRENCY_SYMBOL;

pub use dataset::{NormalizedTransaction, TransactionDataset};

pub const MIN_TRANSACTIONS: usize = 10;

pub const INSUFFICIENT_DATA: &str =
    "Insufficient transaction data for detailed insights. Please add at least 10 transactions.";

/// At most this many budget recommendations make it into the final list.
pub const MAX_RECOMMENDATIONS: usize = 2;

#[derive(Debug, Error, PartialEq)]
pub enum InsightError {
    #[error("dataset has no transactions")]
    EmptyDataset,
    #[error("total spend is zero")]
    ZeroTotal,
    #[error("only {found} distinct points, need {required} clusters")]
    NotEnoughClusters { found: usize, required: usize },
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    #[error("no rows to train on")]
    EmptyTrainingSet,
}

/// The "now" an engine reasons about: ISO week of today and the ISO year
/// that week belongs to. Late December can fall in week 1 of the next year
/// and early January in week 52/53 of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub iso_week: u32,
    pub year: i32,
}

impl Period {
    pub fn from_date(today: NaiveDate) -> Self {
        let iso = today.iso_week();
        Self {
            iso_week: iso.week(),
            year: iso.year(),
        }
    }

    /// Week number before the current one; week 1 has no predecessor in the
    /// same year.
    pub fn last_week(&self) -> Option<u32> {
        self.iso_week.checked_sub(1).filter(|w| *w > 0)
    }
}

/// Read-only snapshot of transactions plus the period it was built for.
/// Build a new engine to see new data.
#[derive(Debug, Clone)]
pub struct InsightEngine {
    dataset: TransactionDataset,
    period: Period,
    currency_symbol: String,
}

impl InsightEngine {
    pub fn new(raw: &[RawTransaction], today: NaiveDate) -> Self {
        Self {
            dataset: TransactionDataset::build(raw),
            period: Period::from_date(today),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    pub fn from_clock(raw: &[RawTransaction]) -> Self {
        Self::new(raw, Local::now().date_naive())
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn dataset(&self) -> &TransactionDataset {
        &self.dataset
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn generate_insights(&self) -> Vec<String> {
        if self.dataset.len() < MIN_TRANSACTIONS {
            debug!(rows = self.dataset.len(), "not enough transactions for insights");
            return vec![INSUFFICIENT_DATA.to_string()];
        }

        let ds = &self.dataset;
        let symbol = self.currency_symbol.as_str();
        let mut insights = Vec::new();

        insights.extend(isolate("weekly comparison", || {
            weekly::compare_weeks(ds, self.period, symbol)
        }));
        insights.extend(isolate("category ranking", || {
            categories::rank_categories(ds, symbol)
        }));
        insights.extend(isolate("clustering", || {
            clustering::summarize_clusters(ds, symbol)
        }));
        insights.extend(isolate("trend prediction", || trend::predict_trend(ds)));
        insights.extend(
            budget::recommendations(ds, self.period)
                .into_iter()
                .take(MAX_RECOMMENDATIONS),
        );
        insights
    }
}

fn isolate<F>(analysis: &'static str, run: F) -> Option<String>
where
    F: FnOnce() -> Result<Option<String>, InsightError>,
{
    match run() {
        Ok(insight) => insight.filter(|s| !s.is_empty()),
        Err(err) => {
            warn!(analysis, error = %err, "analysis produced no insight");
            None
        }
    }
}
