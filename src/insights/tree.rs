// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Binary CART classifier (gini impurity, grown until leaves are pure or
//! cannot be split further).

use super::InsightError;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        class: bool,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree<const N: usize> {
    root: Node,
}

impl<const N: usize> DecisionTree<N> {
    pub fn fit(features: &[[f64; N]], labels: &[bool]) -> Result<Self, InsightError> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(InsightError::EmptyTrainingSet);
        }
        if features.iter().flatten().any(|v| !v.is_finite()) {
            return Err(InsightError::NonFinite("tree features"));
        }
        let idx: Vec<usize> = (0..features.len()).collect();
        Ok(Self {
            root: grow(features, labels, idx),
        })
    }

    pub fn predict(&self, x: &[f64; N]) -> bool {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(n: &Node) -> usize {
            match n {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }
}

fn gini(pos: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = pos as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

fn grow<const N: usize>(features: &[[f64; N]], labels: &[bool], idx: Vec<usize>) -> Node {
    let pos = idx.iter().filter(|&&i| labels[i]).count();
    // ties go to the negative class
    let majority = pos * 2 > idx.len();
    if pos == 0 || pos == idx.len() {
        return Node::Leaf { class: majority };
    }

    let Some((feature, threshold)) = best_split(features, labels, &idx) else {
        return Node::Leaf { class: majority };
    };
    let (left, right): (Vec<usize>, Vec<usize>) = idx
        .into_iter()
        .partition(|&i| features[i][feature] <= threshold);
    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(features, labels, left)),
        right: Box::new(grow(features, labels, right)),
    }
}

/// Lowest weighted child impurity over all features and midpoints between
/// consecutive distinct values. Earlier features win ties.
fn best_split<const N: usize>(
    features: &[[f64; N]],
    labels: &[bool],
    idx: &[usize],
) -> Option<(usize, f64)> {
    let n = idx.len();
    let total_pos = idx.iter().filter(|&&i| labels[i]).count();
    let mut best: Option<(usize, f64, f64)> = None;

    for f in 0..N {
        let mut order = idx.to_vec();
        order.sort_by(|&a, &b| features[a][f].total_cmp(&features[b][f]));
        let mut left_pos = 0;
        for split in 1..n {
            if labels[order[split - 1]] {
                left_pos += 1;
            }
            let lo = features[order[split - 1]][f];
            let hi = features[order[split]][f];
            if lo == hi {
                continue;
            }
            let right_n = n - split;
            let impurity = (split as f64 * gini(left_pos, split)
                + right_n as f64 * gini(total_pos - left_pos, right_n))
                / n as f64;
            if best.is_none_or(|(_, _, b)| impurity < b - 1e-12) {
                let mut threshold = lo + (hi - lo) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some((f, threshold, impurity));
            }
        }
    }
    best.map(|(f, t, _)| (f, t))
}
