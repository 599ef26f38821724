// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::debug;

use super::kmeans::KMeans;
use super::{InsightError, TransactionDataset};
use crate::models::Category;
use crate::utils::fmt_money;

pub const CLUSTER_COUNT: usize = 3;

/// Groups transactions on (amount, category code) and describes each group
/// center. Descriptive only; the group count is fixed.
pub fn summarize_clusters(
    dataset: &TransactionDataset,
    symbol: &str,
) -> Result<Option<String>, InsightError> {
    let points: Vec<[f64; 2]> = dataset
        .rows()
        .iter()
        .map(|r| [r.amount, r.category as f64])
        .collect();

    let fit = match KMeans::new(CLUSTER_COUNT).fit(&points) {
        Ok(fit) => fit,
        Err(InsightError::NotEnoughClusters { found, required }) => {
            debug!(found, required, "too little variety to cluster");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let mut centers = fit.centers;
    if centers.iter().flatten().any(|v| !v.is_finite()) {
        return Err(InsightError::NonFinite("cluster centers"));
    }
    centers.sort_by(|a, b| a[0].total_cmp(&b[0]));

    let lines: Vec<String> = centers
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "🔍 Cluster {}: Average spending = {}, Category = {}",
                i + 1,
                fmt_money(c[0], symbol),
                nearest_category(c[1])
            )
        })
        .collect();
    Ok(Some(lines.join("\n")))
}

/// Rounds a center's category coordinate to a code; the gap at 5 and
/// anything out of range read as "Unknown".
pub fn nearest_category(coord: f64) -> &'static str {
    Category::from_code(coord.round() as i64)
        .map(Category::name)
        .unwrap_or("Unknown")
}
