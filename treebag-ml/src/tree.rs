//! Binary regression tree with pluggable split selection.
//!
//! The tree is grown recursively: a node becomes a leaf (mean response of its
//! rows) once it holds at most `leaf_size` rows or a single response value;
//! otherwise the [`SplitSelector`] picks a feature and threshold, rows with
//! `x[feature] <= threshold` go left and the rest go right. A split that
//! leaves either side empty is replaced by a leaf.
//!
//! Data is flat row-major `&[f64]` with an `n_features` parameter, consistent
//! with the rest of the treebag-ml crate.

use rand::RngCore;
use treebag_core::{validate_features, validate_training, Regressor, Result, Summarizable, TreebagError};

use crate::numeric::{subset_all_equal, subset_mean};
use crate::split::{CorrelationSplit, RandomSplit, SplitSelector};

// ---------------------------------------------------------------------------
// Tree node representation (pre-order flattened)
// ---------------------------------------------------------------------------

/// A single node in the flattened tree.
///
/// Children are addressed relative to the node itself: the left child always
/// follows directly (`left_offset == 1`) and the right child starts after the
/// whole left subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeNode {
    /// Internal split node.
    Split {
        feature_idx: usize,
        threshold: f64,
        left_offset: usize,
        right_offset: usize,
    },
    /// Terminal leaf node.
    Leaf { value: f64 },
}

impl TreeNode {
    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Encode as a fixed `[feature, value, left_offset, right_offset]`
    /// record. Leaves carry `NaN` in the feature and offset slots.
    pub fn to_record(&self) -> [f64; 4] {
        match *self {
            TreeNode::Split {
                feature_idx,
                threshold,
                left_offset,
                right_offset,
            } => [
                feature_idx as f64,
                threshold,
                left_offset as f64,
                right_offset as f64,
            ],
            TreeNode::Leaf { value } => [f64::NAN, value, f64::NAN, f64::NAN],
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for tree training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeConfig {
    /// Nodes holding at most this many rows become leaves. Must be >= 1.
    pub leaf_size: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { leaf_size: 1 }
    }
}

fn validate_config(config: &TreeConfig) -> Result<()> {
    if config.leaf_size == 0 {
        return Err(TreebagError::InvalidInput("leaf_size must be >= 1".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TreeRegressor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct FittedTree {
    nodes: Vec<TreeNode>,
    n_features: usize,
}

/// A regression tree parameterized by its split strategy.
///
/// Starts unfit; [`fit`](TreeRegressor::fit) builds the tree, replacing any
/// previous one.
#[derive(Debug, Clone)]
pub struct TreeRegressor<S = CorrelationSplit> {
    config: TreeConfig,
    splitter: S,
    fitted: Option<FittedTree>,
}

/// Tree that splits on the feature most correlated with the response.
pub type DecisionTreeRegressor = TreeRegressor<CorrelationSplit>;

/// Tree that splits on a randomly chosen feature.
pub type RandomTreeRegressor = TreeRegressor<RandomSplit>;

impl<S: SplitSelector + Default> TreeRegressor<S> {
    /// Unfit tree with the given leaf size and a default-constructed splitter.
    pub fn with_leaf_size(leaf_size: usize) -> Self {
        Self::new(TreeConfig { leaf_size }, S::default())
    }
}

impl<S: SplitSelector + Default> Default for TreeRegressor<S> {
    fn default() -> Self {
        Self::new(TreeConfig::default(), S::default())
    }
}

impl<S: SplitSelector> TreeRegressor<S> {
    /// Unfit tree with an explicit configuration and split strategy.
    pub fn new(config: TreeConfig, splitter: S) -> Self {
        Self {
            config,
            splitter,
            fitted: None,
        }
    }

    /// Fit the tree on flat row-major data.
    ///
    /// * `data` — flat row-major `n_samples x n_features`
    /// * `n_features` — number of features per sample
    /// * `targets` — response for each sample
    /// * `rng` — randomness for the split strategy (unused by
    ///   [`CorrelationSplit`])
    ///
    /// # Errors
    ///
    /// Returns [`TreebagError::InvalidInput`] if `leaf_size` is 0, the data is
    /// empty, or dimensions are inconsistent. On error any previously fitted
    /// tree is kept.
    pub fn fit(
        &mut self,
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        validate_config(&self.config)?;
        let n_samples = validate_training(data, n_features, targets)?;

        let indices: Vec<usize> = (0..n_samples).collect();
        let mut builder = TreeBuilder {
            data,
            n_features,
            targets,
            leaf_size: self.config.leaf_size,
            splitter: &self.splitter,
            rng,
            nodes: Vec::new(),
        };
        builder.grow(&indices);
        let nodes = builder.nodes;

        tracing::debug!(
            splitter = self.splitter.name(),
            n_samples,
            n_nodes = nodes.len(),
            depth = subtree_depth(&nodes, 0),
            "fitted tree"
        );
        self.fitted = Some(FittedTree { nodes, n_features });
        Ok(())
    }

    /// Predict the response for a single sample.
    ///
    /// # Errors
    ///
    /// [`TreebagError::NotFitted`] before `fit`, and
    /// [`TreebagError::InvalidInput`] if `sample` does not have the trained
    /// number of features.
    pub fn query_one(&self, sample: &[f64]) -> Result<f64> {
        let fitted = self.fitted()?;
        if sample.len() != fitted.n_features {
            return Err(TreebagError::InvalidInput(format!(
                "sample has {} features, tree was trained on {}",
                sample.len(),
                fitted.n_features
            )));
        }
        Ok(traverse(&fitted.nodes, sample))
    }

    /// Predict the response for every row of `data`, in row order.
    pub fn query(&self, data: &[f64], n_features: usize) -> Result<Vec<f64>> {
        let fitted = self.fitted()?;
        let n_samples = validate_features(data, n_features)?;
        if n_features != fitted.n_features {
            return Err(TreebagError::InvalidInput(format!(
                "data has {} features, tree was trained on {}",
                n_features, fitted.n_features
            )));
        }
        Ok((0..n_samples)
            .map(|i| traverse(&fitted.nodes, &data[i * n_features..(i + 1) * n_features]))
            .collect())
    }

    /// Whether the tree has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The training configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Minimum node size below which splitting stops.
    pub fn leaf_size(&self) -> usize {
        self.config.leaf_size
    }

    /// The split strategy.
    pub fn splitter(&self) -> &S {
        &self.splitter
    }

    /// The flattened nodes in pre-order, if fitted.
    pub fn nodes(&self) -> Option<&[TreeNode]> {
        self.fitted.as_ref().map(|f| f.nodes.as_slice())
    }

    /// Number of features seen during fitting.
    pub fn n_features(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.n_features)
    }

    /// Total number of nodes (0 when unfit).
    pub fn n_nodes(&self) -> usize {
        self.nodes().map_or(0, |n| n.len())
    }

    /// Number of leaf nodes (0 when unfit).
    pub fn n_leaves(&self) -> usize {
        self.nodes()
            .map_or(0, |n| n.iter().filter(|node| node.is_leaf()).count())
    }

    /// Number of split levels on the longest root-to-leaf path. A single
    /// leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes().map_or(0, |n| subtree_depth(n, 0))
    }

    /// Export the tree as flat `[feature, value, left_offset, right_offset]`
    /// records in pre-order.
    pub fn to_records(&self) -> Result<Vec<[f64; 4]>> {
        Ok(self.fitted()?.nodes.iter().map(TreeNode::to_record).collect())
    }

    /// Rebuild a fitted tree from records produced by
    /// [`to_records`](TreeRegressor::to_records).
    ///
    /// # Errors
    ///
    /// Returns [`TreebagError::InvalidInput`] if a record is malformed, a
    /// feature index is out of range, or the offsets do not describe a
    /// pre-order binary tree covering exactly the given records.
    pub fn from_records(
        config: TreeConfig,
        splitter: S,
        n_features: usize,
        records: &[[f64; 4]],
    ) -> Result<Self> {
        validate_config(&config)?;
        if n_features == 0 {
            return Err(TreebagError::InvalidInput("n_features must be > 0".into()));
        }
        if records.is_empty() {
            return Err(TreebagError::InvalidInput("no tree records".into()));
        }
        let nodes = records
            .iter()
            .enumerate()
            .map(|(i, r)| parse_record(i, r, n_features))
            .collect::<Result<Vec<_>>>()?;

        let size = check_subtree(&nodes, 0)?;
        if size != nodes.len() {
            return Err(TreebagError::InvalidInput(format!(
                "tree covers {} of {} records",
                size,
                nodes.len()
            )));
        }

        Ok(Self {
            config,
            splitter,
            fitted: Some(FittedTree { nodes, n_features }),
        })
    }

    fn fitted(&self) -> Result<&FittedTree> {
        self.fitted
            .as_ref()
            .ok_or_else(|| TreebagError::NotFitted("tree has not been fitted".into()))
    }
}

impl<S: SplitSelector> Regressor for TreeRegressor<S> {
    fn fit(
        &mut self,
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        TreeRegressor::fit(self, data, n_features, targets, rng)
    }

    fn predict(&self, data: &[f64], n_features: usize) -> Result<Vec<f64>> {
        self.query(data, n_features)
    }

    fn is_fitted(&self) -> bool {
        TreeRegressor::is_fitted(self)
    }
}

impl<S: SplitSelector> Summarizable for TreeRegressor<S> {
    fn summary(&self) -> String {
        match &self.fitted {
            Some(f) => format!(
                "TreeRegressor({}): {} nodes, {} leaves, depth {}, {} features",
                self.splitter.name(),
                f.nodes.len(),
                self.n_leaves(),
                self.depth(),
                f.n_features
            ),
            None => format!(
                "TreeRegressor({}): unfitted, leaf_size {}",
                self.splitter.name(),
                self.config.leaf_size
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tree building
// ---------------------------------------------------------------------------

struct TreeBuilder<'a, S> {
    data: &'a [f64],
    n_features: usize,
    targets: &'a [f64],
    leaf_size: usize,
    splitter: &'a S,
    rng: &'a mut dyn RngCore,
    nodes: Vec<TreeNode>,
}

impl<S: SplitSelector> TreeBuilder<'_, S> {
    /// Append the subtree for `indices` in pre-order, returning its root index.
    fn grow(&mut self, indices: &[usize]) -> usize {
        if subset_all_equal(self.targets, indices) {
            // exact value, no rounding from the mean
            return self.push_leaf(self.targets[indices[0]]);
        }
        if indices.len() <= self.leaf_size {
            return self.push_leaf(subset_mean(self.targets, indices));
        }

        let (feature_idx, threshold) = self.splitter.select_split(
            self.data,
            self.n_features,
            self.targets,
            indices,
            &mut *self.rng,
        );
        let (left, right) = partition(self.data, self.n_features, indices, feature_idx, threshold);

        // Median failed to separate the rows
        if left.is_empty() || right.is_empty() {
            return self.push_leaf(subset_mean(self.targets, indices));
        }

        let node_idx = self.nodes.len();
        self.nodes.push(TreeNode::Leaf { value: 0.0 }); // placeholder

        self.grow(&left);
        let right_idx = self.grow(&right);

        self.nodes[node_idx] = TreeNode::Split {
            feature_idx,
            threshold,
            left_offset: 1,
            right_offset: right_idx - node_idx,
        };
        node_idx
    }

    fn push_leaf(&mut self, value: f64) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(TreeNode::Leaf { value });
        idx
    }
}

/// Partition sample indices by threshold on a given feature.
fn partition(
    data: &[f64],
    n_features: usize,
    indices: &[usize],
    feature_idx: usize,
    threshold: f64,
) -> (Vec<usize>, Vec<usize>) {
    indices
        .iter()
        .copied()
        .partition(|&i| data[i * n_features + feature_idx] <= threshold)
}

// ---------------------------------------------------------------------------
// Traversal and structure helpers
// ---------------------------------------------------------------------------

fn traverse(nodes: &[TreeNode], sample: &[f64]) -> f64 {
    let mut idx = 0;
    loop {
        match nodes[idx] {
            TreeNode::Leaf { value } => return value,
            TreeNode::Split {
                feature_idx,
                threshold,
                left_offset,
                right_offset,
            } => {
                if sample[feature_idx] <= threshold {
                    idx += left_offset;
                } else {
                    idx += right_offset;
                }
            }
        }
    }
}

fn subtree_depth(nodes: &[TreeNode], idx: usize) -> usize {
    match nodes[idx] {
        TreeNode::Leaf { .. } => 0,
        TreeNode::Split {
            left_offset,
            right_offset,
            ..
        } => {
            1 + subtree_depth(nodes, idx + left_offset).max(subtree_depth(nodes, idx + right_offset))
        }
    }
}

/// Validate the subtree rooted at `idx` and return its node count.
fn check_subtree(nodes: &[TreeNode], idx: usize) -> Result<usize> {
    match nodes.get(idx) {
        None => Err(TreebagError::InvalidInput(format!(
            "child offset points past the end of the tree (node {})",
            idx
        ))),
        Some(TreeNode::Leaf { .. }) => Ok(1),
        Some(&TreeNode::Split {
            left_offset,
            right_offset,
            ..
        }) => {
            if left_offset != 1 {
                return Err(TreebagError::InvalidInput(format!(
                    "node {}: left offset must be 1, got {}",
                    idx, left_offset
                )));
            }
            let left_size = check_subtree(nodes, idx + 1)?;
            if right_offset != left_size + 1 {
                return Err(TreebagError::InvalidInput(format!(
                    "node {}: right offset {} does not follow left subtree of {} nodes",
                    idx, right_offset, left_size
                )));
            }
            let right_size = check_subtree(nodes, idx + right_offset)?;
            Ok(1 + left_size + right_size)
        }
    }
}

fn parse_record(idx: usize, record: &[f64; 4], n_features: usize) -> Result<TreeNode> {
    let [feature, value, left, right] = *record;
    if feature.is_nan() {
        if !left.is_nan() || !right.is_nan() {
            return Err(TreebagError::InvalidInput(format!(
                "record {}: leaf must not carry child offsets",
                idx
            )));
        }
        return Ok(TreeNode::Leaf { value });
    }

    let as_index = |v: f64, what: &str| -> Result<usize> {
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
            Ok(v as usize)
        } else {
            Err(TreebagError::InvalidInput(format!(
                "record {}: {} {} is not a non-negative integer",
                idx, what, v
            )))
        }
    };
    let feature_idx = as_index(feature, "feature index")?;
    if feature_idx >= n_features {
        return Err(TreebagError::InvalidInput(format!(
            "record {}: feature index {} out of range for {} features",
            idx, feature_idx, n_features
        )));
    }
    Ok(TreeNode::Split {
        feature_idx,
        threshold: value,
        left_offset: as_index(left, "left offset")?,
        right_offset: as_index(right, "right offset")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn staircase() -> DecisionTreeRegressor {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let targets = vec![1.0, 2.0, 3.0, 4.0];
        let mut tree = DecisionTreeRegressor::with_leaf_size(1);
        tree.fit(&data, 1, &targets, &mut rng()).unwrap();
        tree
    }

    #[test]
    fn staircase_layout() {
        let tree = staircase();
        let nodes = tree.nodes().unwrap();
        assert_eq!(nodes.len(), 7);
        assert_eq!(
            nodes[0],
            TreeNode::Split {
                feature_idx: 0,
                threshold: 2.5,
                left_offset: 1,
                right_offset: 4
            }
        );
        assert_eq!(
            nodes[1],
            TreeNode::Split {
                feature_idx: 0,
                threshold: 1.5,
                left_offset: 1,
                right_offset: 2
            }
        );
        assert_eq!(nodes[2], TreeNode::Leaf { value: 1.0 });
        assert_eq!(nodes[3], TreeNode::Leaf { value: 2.0 });
        assert_eq!(
            nodes[4],
            TreeNode::Split {
                feature_idx: 0,
                threshold: 3.5,
                left_offset: 1,
                right_offset: 2
            }
        );
        assert_eq!(nodes[5], TreeNode::Leaf { value: 3.0 });
        assert_eq!(nodes[6], TreeNode::Leaf { value: 4.0 });
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_leaves(), 4);
    }

    #[test]
    fn staircase_queries() {
        let tree = staircase();
        assert_eq!(tree.query_one(&[1.0]).unwrap(), 1.0);
        assert_eq!(tree.query_one(&[4.0]).unwrap(), 4.0);
        // <= 2.5 goes left at the root, then > 1.5 goes right
        assert_eq!(tree.query_one(&[2.5]).unwrap(), 2.0);
        assert_eq!(tree.query(&[0.0, 3.2, 100.0], 1).unwrap(), vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn constant_response_is_single_leaf() {
        let data = vec![
            0.0, 1.0, 2.0,
            3.0, 4.0, 5.0,
            6.0, 7.0, 8.0,
        ];
        let targets = vec![2.5, 2.5, 2.5];
        for leaf_size in [1, 2, 10] {
            let mut tree = DecisionTreeRegressor::with_leaf_size(leaf_size);
            tree.fit(&data, 3, &targets, &mut rng()).unwrap();
            assert_eq!(tree.nodes().unwrap(), &[TreeNode::Leaf { value: 2.5 }]);
            assert_eq!(tree.query_one(&[99.0, -1.0, 0.0]).unwrap(), 2.5);
        }
    }

    #[test]
    fn leaf_size_limits_growth() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let targets = vec![1.0, 2.0, 3.0, 4.0];
        let mut tree = DecisionTreeRegressor::with_leaf_size(2);
        tree.fit(&data, 1, &targets, &mut rng()).unwrap();
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.query(&[1.0, 4.0], 1).unwrap(), vec![1.5, 3.5]);

        let mut stump = DecisionTreeRegressor::with_leaf_size(4);
        stump.fit(&data, 1, &targets, &mut rng()).unwrap();
        assert_eq!(stump.nodes().unwrap(), &[TreeNode::Leaf { value: 2.5 }]);
    }

    #[test]
    fn skewed_median_terminates() {
        let data = vec![1.0, 1.0, 1.0, 2.0];
        let targets = vec![1.0, 1.0, 1.0, 2.0];

        let mut dt = DecisionTreeRegressor::with_leaf_size(1);
        dt.fit(&data, 1, &targets, &mut rng()).unwrap();
        assert_eq!(dt.n_nodes(), 3);
        assert_eq!(dt.query(&[1.0, 2.0], 1).unwrap(), vec![1.0, 2.0]);

        let mut rt = RandomTreeRegressor::with_leaf_size(1);
        rt.fit(&data, 1, &targets, &mut rng()).unwrap();
        assert_eq!(rt.n_nodes(), 3);
        assert_eq!(rt.query(&[1.0, 2.0], 1).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn non_bisecting_split_becomes_leaf() {
        // the left side [1,1,1] cannot be split further but has mixed responses
        let data = vec![1.0, 1.0, 1.0, 2.0];
        let targets = vec![1.0, 2.0, 3.0, 4.0];
        let mut tree = DecisionTreeRegressor::with_leaf_size(1);
        tree.fit(&data, 1, &targets, &mut rng()).unwrap();
        let nodes = tree.nodes().unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1], TreeNode::Leaf { value: 2.0 });
        assert_eq!(nodes[2], TreeNode::Leaf { value: 4.0 });
    }

    #[test]
    fn random_constant_column_becomes_leaf() {
        let data = vec![
            5.0, 1.0,
            5.0, 2.0,
            5.0, 3.0,
            5.0, 4.0,
        ];
        let targets = vec![1.0, 2.0, 3.0, 4.0];
        for seed in 0..20 {
            let mut tree = RandomTreeRegressor::with_leaf_size(1);
            tree.fit(&data, 2, &targets, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            for node in tree.nodes().unwrap() {
                if let TreeNode::Split { feature_idx, .. } = node {
                    assert_eq!(*feature_idx, 1);
                }
            }
        }
    }

    #[test]
    fn random_tree_seeded_is_reproducible() {
        let data: Vec<f64> = (0..60).map(|i| ((i * 37) % 17) as f64).collect();
        let targets: Vec<f64> = (0..20).map(|i| (i % 7) as f64).collect();

        let mut a = RandomTreeRegressor::with_leaf_size(1);
        let mut b = RandomTreeRegressor::with_leaf_size(1);
        a.fit(&data, 3, &targets, &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        b.fit(&data, 3, &targets, &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        assert_eq!(a.nodes(), b.nodes());
    }

    #[test]
    fn fits_training_data_exactly_with_leaf_size_one() {
        let data = vec![
            0.0, 10.0,
            1.0, 8.0,
            2.0, 6.0,
            3.0, 4.0,
            4.0, 2.0,
        ];
        let targets = vec![0.5, 1.5, 2.5, 3.5, 4.5];
        let mut tree = DecisionTreeRegressor::default();
        tree.fit(&data, 2, &targets, &mut rng()).unwrap();
        assert_eq!(tree.query(&data, 2).unwrap(), targets);
    }

    #[test]
    fn query_is_idempotent() {
        let tree = staircase();
        let x = vec![0.3, 1.7, 2.9, 3.6];
        assert_eq!(tree.query(&x, 1).unwrap(), tree.query(&x, 1).unwrap());
    }

    #[test]
    fn refit_replaces_tree() {
        let mut tree = staircase();
        tree.fit(&[1.0, 2.0], 1, &[7.0, 7.0], &mut rng()).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.query_one(&[4.0]).unwrap(), 7.0);
    }

    #[test]
    fn query_before_fit_errors() {
        let tree = DecisionTreeRegressor::default();
        assert!(!tree.is_fitted());
        assert!(tree.query(&[1.0], 1).unwrap_err().is_not_fitted());
        assert!(tree.query_one(&[1.0]).unwrap_err().is_not_fitted());
        assert!(tree.to_records().unwrap_err().is_not_fitted());
    }

    #[test]
    fn invalid_leaf_size_errors() {
        let mut tree = DecisionTreeRegressor::with_leaf_size(0);
        let err = tree.fit(&[1.0, 2.0], 1, &[1.0, 2.0], &mut rng()).unwrap_err();
        assert!(matches!(err, TreebagError::InvalidInput(_)));
        assert!(!tree.is_fitted());
    }

    #[test]
    fn invalid_data_errors() {
        let mut tree = DecisionTreeRegressor::default();
        assert!(tree.fit(&[], 1, &[], &mut rng()).is_err());
        assert!(tree.fit(&[1.0, 2.0, 3.0], 2, &[1.0], &mut rng()).is_err());
        assert!(tree.fit(&[1.0, 2.0], 1, &[1.0], &mut rng()).is_err());
        assert!(tree.fit(&[1.0, 2.0], 0, &[1.0], &mut rng()).is_err());
    }

    #[test]
    fn failed_fit_keeps_previous_tree() {
        let mut tree = staircase();
        assert!(tree.fit(&[1.0], 1, &[1.0, 2.0], &mut rng()).is_err());
        assert_eq!(tree.n_nodes(), 7);
        assert_eq!(tree.query_one(&[4.0]).unwrap(), 4.0);
    }

    #[test]
    fn query_width_mismatch_errors() {
        let tree = staircase();
        assert!(tree.query(&[1.0, 2.0], 2).is_err());
        assert!(tree.query_one(&[1.0, 2.0]).is_err());
        assert!(tree.query(&[], 1).unwrap().is_empty());
    }

    #[test]
    fn records_round_trip() {
        let tree = staircase();
        let records = tree.to_records().unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(records[0], [0.0, 2.5, 1.0, 4.0]);
        assert!(records[2][0].is_nan() && records[2][2].is_nan() && records[2][3].is_nan());
        assert_eq!(records[2][1], 1.0);

        let restored =
            DecisionTreeRegressor::from_records(TreeConfig::default(), CorrelationSplit, 1, &records)
                .unwrap();
        assert_eq!(restored.nodes(), tree.nodes());
        let x = vec![0.0, 2.5, 3.7];
        assert_eq!(restored.query(&x, 1).unwrap(), tree.query(&x, 1).unwrap());
    }

    #[test]
    fn malformed_records_rejected() {
        let nan = f64::NAN;
        let build = |records: &[[f64; 4]]| {
            DecisionTreeRegressor::from_records(TreeConfig::default(), CorrelationSplit, 2, records)
        };
        assert!(build(&[]).is_err());
        // right offset past the end
        assert!(build(&[[0.0, 1.0, 1.0, 5.0], [nan, 1.0, nan, nan]]).is_err());
        // left offset not 1
        assert!(build(&[[0.0, 1.0, 2.0, 1.0], [nan, 1.0, nan, nan], [nan, 2.0, nan, nan]]).is_err());
        // feature out of range
        assert!(build(&[[2.0, 1.0, 1.0, 2.0], [nan, 1.0, nan, nan], [nan, 2.0, nan, nan]]).is_err());
        // fractional feature index
        assert!(build(&[[0.5, 1.0, 1.0, 2.0], [nan, 1.0, nan, nan], [nan, 2.0, nan, nan]]).is_err());
        // leaf with offsets
        assert!(build(&[[nan, 1.0, 1.0, nan]]).is_err());
        // trailing records not reachable
        assert!(build(&[[nan, 1.0, nan, nan], [nan, 2.0, nan, nan]]).is_err());
        // valid stump
        assert!(build(&[[1.0, 0.5, 1.0, 2.0], [nan, 1.0, nan, nan], [nan, 2.0, nan, nan]]).is_ok());
    }

    #[test]
    fn summary_reports_state() {
        let unfit = RandomTreeRegressor::with_leaf_size(3);
        assert!(unfit.summary().contains("unfitted"));
        assert!(unfit.summary().contains("random"));
        let s = staircase().summary();
        assert!(s.contains("7 nodes"), "{}", s);
        assert!(s.contains("depth 2"), "{}", s);
    }
}
