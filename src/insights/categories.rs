// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{InsightError, TransactionDataset};
use crate::utils::fmt_money;

pub const TOP_CATEGORIES: usize = 3;

/// Categories ordered by total spend, largest first. Equal totals keep
/// alphabetical order.
pub fn ranked(dataset: &TransactionDataset) -> Vec<(&'static str, f64)> {
    let mut items: Vec<_> = dataset.category_totals().into_iter().collect();
    items.sort_by(|a, b| b.1.total_cmp(&a.1));
    items
}

pub fn rank_categories(
    dataset: &TransactionDataset,
    symbol: &str,
) -> Result<Option<String>, InsightError> {
    let items = ranked(dataset);
    if items.is_empty() {
        return Ok(None);
    }
    let total = dataset.total_amount();
    if total == 0.0 {
        return Err(InsightError::ZeroTotal);
    }

    let mut lines = vec!["💡 Top spending areas:".to_string()];
    for (name, amount) in items.into_iter().take(TOP_CATEGORIES) {
        let pct = amount / total * 100.0;
        lines.push(format!(
            "• {}: {} ({:.1}%)",
            name,
            fmt_money(amount, symbol),
            pct
        ));
    }
    lines.push(
        "🧠 Review these areas for expenses you could trim or renegotiate.".to_string(),
    );
    Ok(Some(lines.join("\n")))
}
