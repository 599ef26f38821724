// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Seeded k-means (k-means++ seeding, Lloyd iterations) over small,
//! fixed-width feature vectors.

use super::InsightError;

pub const DEFAULT_SEED: u64 = 42;

/// SplitMix64; enough randomness for seeding and fully reproducible.
#[derive(Debug, Clone)]
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }
}

#[derive(Debug, Clone)]
pub struct KMeans {
    pub k: usize,
    pub max_iter: usize,
    pub tol: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clustering<const N: usize> {
    pub centers: Vec<[f64; N]>,
    pub labels: Vec<usize>,
    pub inertia: f64,
    pub iterations: usize,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            tol: 1e-4,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn fit<const N: usize>(&self, points: &[[f64; N]]) -> Result<Clustering<N>, InsightError> {
        if points.iter().flatten().any(|v| !v.is_finite()) {
            return Err(InsightError::NonFinite("clustering input"));
        }
        let distinct = distinct_count(points);
        if self.k == 0 || distinct < self.k {
            return Err(InsightError::NotEnoughClusters {
                found: distinct,
                required: self.k,
            });
        }

        let mut rng = SplitMix64(self.seed);
        let mut centers = self.seed_centers(points, &mut rng);
        let threshold = self.tol * mean_variance(points);
        let mut labels = vec![0usize; points.len()];
        let mut iterations = 0;

        while iterations < self.max_iter {
            iterations += 1;
            for (label, p) in labels.iter_mut().zip(points) {
                *label = nearest(&centers, p).0;
            }
            let updated = recompute(points, &labels, &centers);
            let shift: f64 = centers
                .iter()
                .zip(&updated)
                .map(|(a, b)| sq_dist(a, b))
                .sum();
            centers = updated;
            if shift <= threshold {
                break;
            }
        }

        // Final assignment against the converged centers.
        let mut inertia = 0.0;
        for (label, p) in labels.iter_mut().zip(points) {
            let (idx, d) = nearest(&centers, p);
            *label = idx;
            inertia += d;
        }

        Ok(Clustering {
            centers,
            labels,
            inertia,
            iterations,
        })
    }

    /// Greedy k-means++: each new center is the best of a few D²-weighted
    /// draws, judged by the resulting total distance.
    fn seed_centers<const N: usize>(
        &self,
        points: &[[f64; N]],
        rng: &mut SplitMix64,
    ) -> Vec<[f64; N]> {
        let trials = 2 + (self.k as f64).ln() as usize;
        let mut centers = Vec::with_capacity(self.k);
        centers.push(points[rng.below(points.len())]);
        let mut closest: Vec<f64> = points.iter().map(|p| sq_dist(p, &centers[0])).collect();

        while centers.len() < self.k {
            let total: f64 = closest.iter().sum();
            let mut best: Option<(usize, f64, Vec<f64>)> = None;
            for _ in 0..trials {
                let Some(cand) = weighted_pick(&closest, rng.next_f64() * total) else {
                    continue;
                };
                let updated: Vec<f64> = points
                    .iter()
                    .zip(&closest)
                    .map(|(p, &d)| d.min(sq_dist(p, &points[cand])))
                    .collect();
                let potential: f64 = updated.iter().sum();
                if best.as_ref().is_none_or(|b| potential < b.1) {
                    best = Some((cand, potential, updated));
                }
            }
            // distinct >= k guarantees some point still has positive weight
            let Some((cand, _, updated)) = best else {
                break;
            };
            centers.push(points[cand]);
            closest = updated;
        }
        centers
    }
}

/// First index whose cumulative weight exceeds `target`, skipping zero weights.
fn weighted_pick(weights: &[f64], target: f64) -> Option<usize> {
    let mut acc = 0.0;
    let mut chosen = None;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        acc += w;
        chosen = Some(i);
        if acc > target {
            break;
        }
    }
    chosen
}

fn sq_dist<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the closest center (lowest index on ties) and its squared distance.
fn nearest<const N: usize>(centers: &[[f64; N]], p: &[f64; N]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, c) in centers.iter().enumerate() {
        let d = sq_dist(c, p);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

fn recompute<const N: usize>(
    points: &[[f64; N]],
    labels: &[usize],
    previous: &[[f64; N]],
) -> Vec<[f64; N]> {
    let k = previous.len();
    let mut sums = vec![[0.0; N]; k];
    let mut counts = vec![0usize; k];
    for (p, &l) in points.iter().zip(labels) {
        counts[l] += 1;
        for (s, v) in sums[l].iter_mut().zip(p) {
            *s += v;
        }
    }

    let mut centers = previous.to_vec();
    let mut taken: Vec<usize> = Vec::new();
    for c in 0..k {
        if counts[c] > 0 {
            for (dim, s) in sums[c].iter().enumerate() {
                centers[c][dim] = s / counts[c] as f64;
            }
            continue;
        }
        // Empty cluster: move it onto the point worst served by its center.
        let far = points
            .iter()
            .enumerate()
            .filter(|(i, _)| !taken.contains(i))
            .map(|(i, p)| (i, sq_dist(p, &previous[labels[i]])))
            .max_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((i, _)) = far {
            taken.push(i);
            centers[c] = points[i];
        }
    }
    centers
}

fn mean_variance<const N: usize>(points: &[[f64; N]]) -> f64 {
    if points.is_empty() || N == 0 {
        return 0.0;
    }
    let n = points.len() as f64;
    let mut total = 0.0;
    for dim in 0..N {
        let mean = points.iter().map(|p| p[dim]).sum::<f64>() / n;
        total += points.iter().map(|p| (p[dim] - mean).powi(2)).sum::<f64>() / n;
    }
    total / N as f64
}

fn distinct_count<const N: usize>(points: &[[f64; N]]) -> usize {
    let mut keys: Vec<[u64; N]> = points.iter().map(|p| p.map(f64::to_bits)).collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}
