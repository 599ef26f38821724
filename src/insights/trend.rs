// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::debug;

use super::tree::DecisionTree;
use super::{InsightError, TransactionDataset};

/// Fixed query `[week delta, amount]` the fitted tree is asked about. It is
/// a placeholder, not derived from the user's latest activity.
pub const TREND_QUERY: [f64; 2] = [1.0, 100.0];

/// `[week delta, amount]` per row plus "next row spends more" labels, in
/// dataset order. The first row has delta 0 and the last row is labelled
/// false since it has no successor.
pub fn training_set(dataset: &TransactionDataset) -> (Vec<[f64; 2]>, Vec<bool>) {
    let rows = dataset.rows();
    let features = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let delta = match i {
                0 => 0.0,
                _ => r.iso_week as f64 - rows[i - 1].iso_week as f64,
            };
            [delta, r.amount]
        })
        .collect();
    let labels = rows
        .iter()
        .enumerate()
        .map(|(i, r)| rows.get(i + 1).is_some_and(|next| next.amount > r.amount))
        .collect();
    (features, labels)
}

pub fn predict_trend(dataset: &TransactionDataset) -> Result<Option<String>, InsightError> {
    if dataset.is_empty() {
        return Err(InsightError::EmptyTrainingSet);
    }
    let (features, labels) = training_set(dataset);
    let tree = DecisionTree::fit(&features, &labels)?;
    debug!(depth = tree.depth(), "trend tree fitted");

    let trend = if tree.predict(&TREND_QUERY) {
        "increase"
    } else {
        "decrease"
    };
    Ok(Some(format!(
        "📉 Based on the decision tree model, your expenses are expected to {} next week.",
        trend
    )))
}
