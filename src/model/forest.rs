//! CART random forest: Gini-split decision trees over bootstrap samples.
//!
//! Deliberately small: binary classes, numeric features only (categorical
//! fields arrive already encoded), depth and split-size limits instead of
//! pruning. Training is deterministic for a given seed.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

use super::domain::{Classifier, CLASS_FRAUDULENT, CLASS_LEGITIMATE};

/// Tuning knobs for forest training.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees grown over bootstrap samples.
    pub trees: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Nodes with fewer rows than this become leaves.
    pub min_samples_split: usize,
    /// Seed for bootstrap and feature subsampling.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: 12,
            min_samples_split: 4,
            seed: 42,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: [f64; 2],
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn proba(&self, features: &[f64]) -> [f64; 2] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Serializable forest artifact. The recorded feature names are the single
/// source of truth for feature-vector alignment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Forest {
    feature_names: Vec<String>,
    trees: Vec<Tree>,
    config: ForestConfig,
}

impl Forest {
    /// Fit on a row-major table: `rows[i]` is one feature vector in
    /// `feature_names` order and `labels[i]` its class.
    pub fn fit(
        feature_names: Vec<String>,
        rows: &[Vec<f64>],
        labels: &[u8],
        config: ForestConfig,
    ) -> Result<Self> {
        if config.trees == 0 {
            return Err(Error::config("forest needs at least one tree"));
        }
        if rows.is_empty() {
            return Err(Error::config("cannot fit a forest on zero rows"));
        }
        if rows.len() != labels.len() {
            return Err(Error::config(format!(
                "{} feature rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        let n_features = feature_names.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n_features) {
            return Err(Error::config(format!(
                "feature row has {} columns, schema has {n_features}",
                bad.len()
            )));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let features_per_split = ((n_features as f64).sqrt().round() as usize).max(1);

        let mut trees = Vec::with_capacity(config.trees);
        for _ in 0..config.trees {
            let sample: Vec<usize> = (0..rows.len())
                .map(|_| rng.gen_range(0..rows.len()))
                .collect();
            let mut nodes = Vec::new();
            grow(
                &mut nodes,
                rows,
                labels,
                &sample,
                0,
                &config,
                features_per_split,
                &mut rng,
            );
            trees.push(Tree { nodes });
        }

        Ok(Self {
            feature_names,
            trees,
            config,
        })
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }
}

impl Classifier for Forest {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &[f64]) -> Result<u8> {
        let proba = self.predict_proba(features)?;
        Ok(if proba[CLASS_FRAUDULENT as usize] > proba[CLASS_LEGITIMATE as usize] {
            CLASS_FRAUDULENT
        } else {
            CLASS_LEGITIMATE
        })
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2]> {
        if features.len() != self.feature_names.len() {
            return Err(Error::record(
                format!(
                    "feature vector has {} columns, classifier expects {}",
                    features.len(),
                    self.feature_names.len()
                ),
                features.to_vec(),
            ));
        }
        let mut acc = [0.0f64; 2];
        for tree in &self.trees {
            let p = tree.proba(features);
            acc[0] += p[0];
            acc[1] += p[1];
        }
        let n = self.trees.len() as f64;
        Ok([acc[0] / n, acc[1] / n])
    }
}

fn class_counts(labels: &[u8], sample: &[usize]) -> [usize; 2] {
    let mut counts = [0usize; 2];
    for &i in sample {
        counts[labels[i] as usize] += 1;
    }
    counts
}

fn gini(counts: [usize; 2]) -> f64 {
    let total = (counts[0] + counts[1]) as f64;
    if total == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / total;
    let p1 = counts[1] as f64 / total;
    1.0 - p0 * p0 - p1 * p1
}

fn push_leaf(nodes: &mut Vec<Node>, counts: [usize; 2]) -> usize {
    let total = ((counts[0] + counts[1]) as f64).max(1.0);
    nodes.push(Node::Leaf {
        proba: [counts[0] as f64 / total, counts[1] as f64 / total],
    });
    nodes.len() - 1
}

#[allow(clippy::too_many_arguments)]
fn grow(
    nodes: &mut Vec<Node>,
    rows: &[Vec<f64>],
    labels: &[u8],
    sample: &[usize],
    depth: usize,
    config: &ForestConfig,
    features_per_split: usize,
    rng: &mut StdRng,
) -> usize {
    let counts = class_counts(labels, sample);
    let pure = counts[0] == 0 || counts[1] == 0;
    if pure || depth >= config.max_depth || sample.len() < config.min_samples_split {
        return push_leaf(nodes, counts);
    }

    let Some((feature, threshold)) = best_split(rows, labels, sample, features_per_split, rng)
    else {
        return push_leaf(nodes, counts);
    };

    let (left, right): (Vec<usize>, Vec<usize>) = sample
        .iter()
        .copied()
        .partition(|&i| rows[i][feature] <= threshold);
    if left.is_empty() || right.is_empty() {
        return push_leaf(nodes, counts);
    }

    // Reserve the split slot before recursing so child indices are stable.
    let idx = nodes.len();
    nodes.push(Node::Leaf { proba: [0.0, 0.0] });
    let left_idx = grow(
        nodes,
        rows,
        labels,
        &left,
        depth + 1,
        config,
        features_per_split,
        rng,
    );
    let right_idx = grow(
        nodes,
        rows,
        labels,
        &right,
        depth + 1,
        config,
        features_per_split,
        rng,
    );
    nodes[idx] = Node::Split {
        feature,
        threshold,
        left: left_idx,
        right: right_idx,
    };
    idx
}

/// Best Gini split over a random feature subset, `None` when nothing beats
/// the parent impurity.
fn best_split(
    rows: &[Vec<f64>],
    labels: &[u8],
    sample: &[usize],
    features_per_split: usize,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    let n_features = rows[sample[0]].len();
    let take = features_per_split.min(n_features);

    // Partial Fisher-Yates to pick `take` distinct feature indices.
    let mut candidates: Vec<usize> = (0..n_features).collect();
    for i in 0..take {
        let j = rng.gen_range(i..n_features);
        candidates.swap(i, j);
    }

    let parent = gini(class_counts(labels, sample));
    let total = sample.len() as f64;
    let mut best: Option<(usize, f64, f64)> = None;

    for &feature in &candidates[..take] {
        let mut column: Vec<(f64, u8)> = sample
            .iter()
            .map(|&i| (rows[i][feature], labels[i]))
            .collect();
        column.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut left = [0usize; 2];
        let mut right = [0usize; 2];
        for &(_, label) in &column {
            right[label as usize] += 1;
        }

        for w in 1..column.len() {
            let (value, label) = column[w - 1];
            left[label as usize] += 1;
            right[label as usize] -= 1;
            // No boundary between equal feature values.
            if column[w].0 <= value {
                continue;
            }
            let left_total = w as f64;
            let right_total = total - left_total;
            let weighted = (left_total * gini(left) + right_total * gini(right)) / total;
            if best.map_or(true, |(_, _, impurity)| weighted + 1e-12 < impurity) {
                best = Some((feature, (value + column[w].0) / 2.0, weighted));
            }
        }
    }

    best.and_then(|(feature, threshold, impurity)| {
        (impurity + 1e-12 < parent).then_some((feature, threshold))
    })
}
