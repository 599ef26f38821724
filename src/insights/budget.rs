// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::warn;

use super::{InsightError, Period, TransactionDataset};

/// Share of total spend above which a category gets flagged (strictly greater).
pub const HIGH_SPENDING_THRESHOLD: f64 = 0.30;

/// Last week counts as overspending when above the weekly mean by this factor.
pub const OVERSPEND_FACTOR: f64 = 1.2;

pub const MIN_WEEKS_FOR_ALERT: usize = 4;

pub const FALLBACK_TIPS: [&str; 2] = [
    "🧭 Tip: Set specific budget targets for your top 3 categories to keep spending balanced and grow savings.",
    "💼 Consider automating bill payments and sending any surplus to an emergency or investment account.",
];

pub const OVERSPEND_ALERT: &str = "📉 Last week's expenses were over 20% above your weekly average. Consider spending alerts or a weekly check-in to stay on budget.";

/// Budget recommendations, falling back to the generic tips when nothing
/// specific applies. A failure part-way keeps whatever was found before it.
pub fn recommendations(dataset: &TransactionDataset, period: Period) -> Vec<String> {
    let mut recs = Vec::new();
    if let Err(err) = collect(dataset, period, &mut recs) {
        warn!(analysis = "budget recommendations", error = %err, "analysis stopped early");
    }
    if recs.is_empty() {
        recs.extend(FALLBACK_TIPS.iter().map(|s| s.to_string()));
    }
    recs
}

fn collect(
    dataset: &TransactionDataset,
    period: Period,
    recs: &mut Vec<String>,
) -> Result<(), InsightError> {
    if dataset.is_empty() {
        return Err(InsightError::EmptyDataset);
    }
    let total = dataset.total_amount();
    if total == 0.0 {
        return Err(InsightError::ZeroTotal);
    }

    for (name, amount) in dataset.category_totals() {
        let ratio = amount / total;
        if ratio > HIGH_SPENDING_THRESHOLD {
            recs.push(format!(
                "🔎 Spending on '{}' is consuming {:.0}% of your total expenses. Set a monthly cap or look for cheaper alternatives.",
                name,
                ratio * 100.0
            ));
        }
    }

    let weekly = dataset.weekly_totals(period.year);
    if weekly.len() >= MIN_WEEKS_FOR_ALERT {
        let mean = weekly.values().sum::<f64>() / weekly.len() as f64;
        let last = period
            .last_week()
            .and_then(|w| weekly.get(&w).copied())
            .unwrap_or(0.0);
        if last > mean * OVERSPEND_FACTOR {
            recs.push(OVERSPEND_ALERT.to_string());
        }
    }
    Ok(())
}
