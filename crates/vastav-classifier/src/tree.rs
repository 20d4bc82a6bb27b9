//! CART decision tree over the four threat features.
//!
//! Splits are axis-aligned: `features[feature] <= threshold` goes left.
//! Candidate thresholds are midpoints between consecutive distinct values of
//! a feature, scored by weighted Gini impurity. Fitting is deterministic:
//! features are scanned in order and ties keep the first candidate found.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::Predictor;
use crate::{ClassifierError, Label, Result, TrainingSample};

/// Gini gain below which a split is not worth taking.
const MIN_GAIN: f64 = 1e-12;

/// Stopping criteria for [`DecisionTree::fit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth; the root is depth 0.
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves.
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 8,
            min_samples_split: 2,
        }
    }
}

/// A node of a fitted tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Leaf {
        label: Label,
        /// Training samples that reached this leaf.
        samples: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Wraps an existing node structure.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Fits a tree on `samples`.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::EmptyDataset`] if `samples` is empty.
    pub fn fit(samples: &[TrainingSample], params: &TreeParams) -> Result<Self> {
        if samples.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }

        let rows: Vec<([f64; 4], Label)> = samples
            .iter()
            .map(|s| (s.reading.features(), s.label))
            .collect();
        let indices: Vec<usize> = (0..rows.len()).collect();
        let root = grow(&rows, &indices, 0, params);

        let tree = Self { root };
        debug!(
            samples = samples.len(),
            depth = tree.depth(),
            leaves = tree.leaf_count(),
            "decision tree fitted"
        );
        Ok(tree)
    }

    /// Depth of the deepest leaf.
    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }

    pub fn leaf_count(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => walk(left) + walk(right),
            }
        }
        walk(&self.root)
    }

    /// Checks split features index the feature vector and thresholds are finite.
    pub fn validate(&self) -> std::result::Result<(), String> {
        fn walk(node: &Node) -> std::result::Result<(), String> {
            match node {
                Node::Leaf { .. } => Ok(()),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= 4 {
                        return Err(format!("split on unknown feature {}", feature));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("non-finite threshold on feature {}", feature));
                    }
                    walk(left)?;
                    walk(right)
                }
            }
        }
        walk(&self.root)
    }

    /// Fraction of `samples` the tree labels correctly.
    pub fn accuracy(&self, samples: &[TrainingSample]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let correct = samples
            .iter()
            .filter(|s| self.predict(&s.reading.features()) == s.label)
            .count();
        correct as f64 / samples.len() as f64
    }
}

impl Predictor for DecisionTree {
    fn predict(&self, features: &[f64; 4]) -> Label {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { label, .. } => return *label,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }
}

struct Candidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn grow(rows: &[([f64; 4], Label)], indices: &[usize], depth: usize, params: &TreeParams) -> Node {
    let counts = label_counts(rows, indices);
    let majority = majority_label(&counts);
    let parent_impurity = gini(&counts, indices.len());

    if parent_impurity == 0.0 || depth >= params.max_depth || indices.len() < params.min_samples_split {
        return Node::Leaf {
            label: majority,
            samples: indices.len(),
        };
    }

    let best = match best_split(rows, indices) {
        Some(c) if parent_impurity - c.impurity > MIN_GAIN => c,
        _ => {
            return Node::Leaf {
                label: majority,
                samples: indices.len(),
            }
        }
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| rows[i].0[best.feature] <= best.threshold);

    Node::Split {
        feature: best.feature,
        threshold: best.threshold,
        left: Box::new(grow(rows, &left, depth + 1, params)),
        right: Box::new(grow(rows, &right, depth + 1, params)),
    }
}

fn best_split(rows: &[([f64; 4], Label)], indices: &[usize]) -> Option<Candidate> {
    let total = indices.len();
    let mut best: Option<Candidate> = None;

    for feature in 0..4 {
        let mut sorted: Vec<(f64, Label)> = indices
            .iter()
            .map(|&i| (rows[i].0[feature], rows[i].1))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = [0usize; 3];
        let mut right = [0usize; 3];
        for (_, label) in &sorted {
            right[label.index()] += 1;
        }

        for i in 0..sorted.len() - 1 {
            let (value, label) = sorted[i];
            left[label.index()] += 1;
            right[label.index()] -= 1;

            let next = sorted[i + 1].0;
            if next == value {
                continue;
            }

            let n_left = i + 1;
            let n_right = total - n_left;
            let impurity = (n_left as f64 * gini(&left, n_left)
                + n_right as f64 * gini(&right, n_right))
                / total as f64;

            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                best = Some(Candidate {
                    feature,
                    threshold: (value + next) / 2.0,
                    impurity,
                });
            }
        }
    }

    best
}

fn label_counts(rows: &[([f64; 4], Label)], indices: &[usize]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for &i in indices {
        counts[rows[i].1.index()] += 1;
    }
    counts
}

fn majority_label(counts: &[usize; 3]) -> Label {
    let mut best = Label::ALL[0];
    for label in Label::ALL {
        if counts[label.index()] > counts[best.index()] {
            best = label;
        }
    }
    best
}

fn gini(counts: &[usize; 3], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}
