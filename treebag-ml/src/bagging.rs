//! Bootstrap-aggregated ("bagged") regression ensembles.
//!
//! A [`BagRegressor`] trains `n_bags` copies of a template learner, each on
//! its own bootstrap resample of the training rows, and predicts the
//! elementwise mean of the members' predictions. Any [`Regressor`] can be the
//! template, including another `BagRegressor`.
//!
//! Each bag gets an independent ChaCha stream seeded from the caller's rng
//! before any training starts, so the trained ensemble depends only on the
//! inputs and the caller's seed, whether or not the `parallel` feature fans
//! the bags out across threads.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use treebag_core::{validate_features, validate_training, Regressor, Result, Summarizable, TreebagError};

use crate::numeric::{bootstrap_indices, resample_rows};
use crate::split::SplitSelector;
use crate::tree::{TreeNode, TreeRegressor};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for bagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BagConfig {
    /// Number of bootstrap members. Must be >= 1.
    pub n_bags: usize,
}

impl Default for BagConfig {
    fn default() -> Self {
        Self { n_bags: 20 }
    }
}

fn validate_config(config: &BagConfig) -> Result<()> {
    if config.n_bags == 0 {
        return Err(TreebagError::InvalidInput("n_bags must be >= 1".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// BagRegressor
// ---------------------------------------------------------------------------

/// A bagged ensemble of regressors built from a template learner.
#[derive(Debug, Clone)]
pub struct BagRegressor<L> {
    config: BagConfig,
    template: L,
    members: Vec<L>,
    n_features: Option<usize>,
}

impl<L: Regressor + Clone> BagRegressor<L> {
    /// Unfit ensemble. Every bag starts from a clone of `template`.
    pub fn new(template: L, config: BagConfig) -> Self {
        Self {
            config,
            template,
            members: Vec::new(),
            n_features: None,
        }
    }

    /// Fit `n_bags` members, each on a bootstrap resample of the rows.
    ///
    /// # Errors
    ///
    /// Returns [`TreebagError::InvalidInput`] if `n_bags` is 0, the data is
    /// empty, or dimensions are inconsistent, and propagates any member fit
    /// error. On error the previously fitted members are kept.
    pub fn fit(
        &mut self,
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        validate_config(&self.config)?;
        let n_samples = validate_training(data, n_features, targets)?;

        let seeds: Vec<u64> = (0..self.config.n_bags).map(|_| rng.next_u64()).collect();
        let this = &*self;

        #[cfg(feature = "parallel")]
        let members = {
            use rayon::prelude::*;
            seeds
                .into_par_iter()
                .enumerate()
                .map(|(bag, seed)| this.fit_bag(bag, seed, data, n_features, targets, n_samples))
                .collect::<Result<Vec<L>>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let members = seeds
            .into_iter()
            .enumerate()
            .map(|(bag, seed)| this.fit_bag(bag, seed, data, n_features, targets, n_samples))
            .collect::<Result<Vec<L>>>()?;

        tracing::info!(n_bags = members.len(), n_samples, n_features, "fitted bagged ensemble");
        self.members = members;
        self.n_features = Some(n_features);
        Ok(())
    }

    fn fit_bag(
        &self,
        bag: usize,
        seed: u64,
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        n_samples: usize,
    ) -> Result<L> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let indices = bootstrap_indices(&mut rng, n_samples);
        let (rows, ys) = resample_rows(data, n_features, targets, &indices);

        let mut learner = self.template.clone();
        learner.fit(&rows, n_features, &ys, &mut rng)?;
        tracing::debug!(bag, seed, "fitted bag member");
        Ok(learner)
    }

    /// Predict every row of `data` as the mean of the members' predictions.
    ///
    /// # Errors
    ///
    /// [`TreebagError::NotFitted`] before `fit`, and
    /// [`TreebagError::InvalidInput`] if `data` is malformed or its width
    /// differs from the training data.
    pub fn predict(&self, data: &[f64], n_features: usize) -> Result<Vec<f64>> {
        let trained_features = self
            .n_features
            .ok_or_else(|| TreebagError::NotFitted("ensemble has not been fitted".into()))?;
        let n_samples = validate_features(data, n_features)?;
        if n_features != trained_features {
            return Err(TreebagError::InvalidInput(format!(
                "data has {} features, ensemble was trained on {}",
                n_features, trained_features
            )));
        }

        #[cfg(feature = "parallel")]
        let predictions = {
            use rayon::prelude::*;
            self.members
                .par_iter()
                .map(|m| m.predict(data, n_features))
                .collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let predictions = self
            .members
            .iter()
            .map(|m| m.predict(data, n_features))
            .collect::<Result<Vec<_>>>()?;

        let mut sums = vec![0.0; n_samples];
        for (bag, preds) in predictions.iter().enumerate() {
            if preds.len() != n_samples {
                return Err(TreebagError::Other(format!(
                    "bag {} returned {} predictions for {} rows",
                    bag,
                    preds.len(),
                    n_samples
                )));
            }
            for (sum, p) in sums.iter_mut().zip(preds) {
                *sum += p;
            }
        }
        let n_bags = predictions.len() as f64;
        Ok(sums.into_iter().map(|s| s / n_bags).collect())
    }
}

impl<L> BagRegressor<L> {
    /// Whether the ensemble has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.n_features.is_some()
    }

    /// The configured number of bags.
    pub fn n_bags(&self) -> usize {
        self.config.n_bags
    }

    /// The ensemble configuration.
    pub fn config(&self) -> &BagConfig {
        &self.config
    }

    /// The unfit learner every bag is cloned from.
    pub fn template(&self) -> &L {
        &self.template
    }

    /// Trained members in bag order (empty when unfit).
    pub fn members(&self) -> &[L] {
        &self.members
    }

    /// Number of features seen during fitting.
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }
}

impl<S: SplitSelector + Clone> BagRegressor<TreeRegressor<S>> {
    /// Feature importance as the normalized frequency of each feature being
    /// used for splits across all member trees.
    ///
    /// The returned vector has one entry per training feature and sums to 1.0,
    /// or is all zeros when no member tree splits.
    pub fn feature_importance(&self) -> Result<Vec<f64>> {
        let n_features = self
            .n_features
            .ok_or_else(|| TreebagError::NotFitted("ensemble has not been fitted".into()))?;

        let mut counts = vec![0usize; n_features];
        let mut total = 0usize;
        for tree in &self.members {
            for node in tree.nodes().unwrap_or(&[]) {
                if let TreeNode::Split { feature_idx, .. } = node {
                    if *feature_idx < n_features {
                        counts[*feature_idx] += 1;
                        total += 1;
                    }
                }
            }
        }

        if total == 0 {
            return Ok(vec![0.0; n_features]);
        }
        Ok(counts.iter().map(|&c| c as f64 / total as f64).collect())
    }
}

impl<L: Regressor + Clone> Regressor for BagRegressor<L> {
    fn fit(
        &mut self,
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        BagRegressor::fit(self, data, n_features, targets, rng)
    }

    fn predict(&self, data: &[f64], n_features: usize) -> Result<Vec<f64>> {
        BagRegressor::predict(self, data, n_features)
    }

    fn is_fitted(&self) -> bool {
        BagRegressor::is_fitted(self)
    }
}

impl<L> Summarizable for BagRegressor<L> {
    fn summary(&self) -> String {
        match self.n_features {
            Some(n_features) => format!(
                "BagRegressor: {} members, {} features",
                self.members.len(),
                n_features
            ),
            None => format!("BagRegressor: unfitted, {} bags", self.config.n_bags),
        }
    }
}
