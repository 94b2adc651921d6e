//! Split selection strategies for the tree builder.
//!
//! A [`SplitSelector`] looks at the rows that reached a node and picks the
//! `(feature, threshold)` pair to partition them on. Both strategies use the
//! median of the chosen feature over the node's rows as the threshold; they
//! differ only in how the feature is chosen.

use rand::{Rng, RngCore};

use crate::numeric::{all_equal, gather_column, gather_targets, median, pearson};

/// Strategy choosing the split for a node.
pub trait SplitSelector: Send + Sync {
    /// Pick `(feature_idx, threshold)` for the rows in `indices`.
    ///
    /// `indices` is never empty and `n_features` is at least 1. The returned
    /// threshold need not separate the rows; the builder guards against
    /// splits that leave one side empty.
    fn select_split(
        &self,
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        indices: &[usize],
        rng: &mut dyn RngCore,
    ) -> (usize, f64);

    /// Short name used in summaries and logs.
    fn name(&self) -> &'static str;
}

/// Splits on the feature with the largest absolute Pearson correlation with
/// the response, at that feature's median.
///
/// Constant columns score 0.0. Ties go to the lowest feature index, and if
/// every column is constant feature 0 is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelationSplit;

impl SplitSelector for CorrelationSplit {
    fn select_split(
        &self,
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        indices: &[usize],
        _rng: &mut dyn RngCore,
    ) -> (usize, f64) {
        let ys = gather_targets(targets, indices);

        let mut best: Option<(usize, f64, Vec<f64>)> = None;

        for feat in 0..n_features {
            let column = gather_column(data, n_features, indices, feat);
            if all_equal(&column) {
                continue;
            }
            let corr = pearson(&column, &ys).abs();
            // strict comparison keeps the lowest index on ties
            if best.as_ref().map_or(true, |(_, best_corr, _)| corr > *best_corr) {
                best = Some((feat, corr, column));
            }
        }

        let (feature, corr, column) = match best {
            Some(best) => best,
            None => (0, 0.0, gather_column(data, n_features, indices, 0)),
        };
        let threshold = median(&column);
        tracing::trace!(feature, corr, threshold, "correlation split");
        (feature, threshold)
    }

    fn name(&self) -> &'static str {
        "correlation"
    }
}

/// Splits on a feature drawn uniformly at random, at that feature's median.
///
/// No filtering of constant columns is done, so the chosen split may fail to
/// separate the rows; the builder then emits a leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomSplit;

impl SplitSelector for RandomSplit {
    fn select_split(
        &self,
        data: &[f64],
        n_features: usize,
        _targets: &[f64],
        indices: &[usize],
        rng: &mut dyn RngCore,
    ) -> (usize, f64) {
        let feature = rng.gen_range(0..n_features);
        let threshold = median(&gather_column(data, n_features, indices, feature));
        tracing::trace!(feature, threshold, "random split");
        (feature, threshold)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
