// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{InsightError, Period, TransactionDataset};
use crate::utils::fmt_money;

/// Changes smaller than this (in percent, either direction) count as stable.
pub const STABILITY_BAND_PCT: f64 = 5.0;

/// Compares this ISO week's spend with the previous week of the same ISO year.
pub fn compare_weeks(
    dataset: &TransactionDataset,
    period: Period,
    symbol: &str,
) -> Result<Option<String>, InsightError> {
    let weekly = dataset.weekly_totals(period.year);
    if weekly.len() < 2 {
        return Ok(None);
    }

    let current = weekly.get(&period.iso_week).copied().unwrap_or(0.0);
    let last = period
        .last_week()
        .and_then(|w| weekly.get(&w).copied())
        .unwrap_or(0.0);

    if last == 0.0 {
        return Ok(Some(format!(
            "Current week spending: {}",
            fmt_money(current, symbol)
        )));
    }

    let change = (current - last) / last * 100.0;
    if !change.is_finite() {
        return Err(InsightError::NonFinite("weekly change"));
    }

    let msg = if change.abs() < STABILITY_BAND_PCT {
        "📊 Your weekly spending stayed within 5% of the previous week, a sign of steady habits. Keep it up.".to_string()
    } else if change > 0.0 {
        format!(
            "⚠️ This week's expenses rose by {:.0}% compared to last week. Look for discretionary or one-off purchases.",
            change.abs()
        )
    } else {
        format!(
            "✅ You reduced your weekly expenses by {:.0}%. A good moment to move the difference into savings.",
            change.abs()
        )
    };
    Ok(Some(msg))
}
