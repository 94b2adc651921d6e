//! Core trait definitions shared by the treebag learners.
//!
//! These traits define the contracts that learners implement so they can be
//! composed, e.g. any [`Regressor`] can serve as the base of a bagged ensemble.

use rand::RngCore;

/// A supervised regressor over flat row-major feature matrices.
///
/// `data` holds `n_samples * n_features` values in row-major order and
/// `targets` holds one response per row. Learners start unfit; `fit` replaces
/// any previously trained state and `predict` fails until `fit` succeeds.
pub trait Regressor: Send + Sync {
    /// Train on the given data, replacing any prior trained state.
    ///
    /// `rng` is the only source of randomness the learner may use, so that
    /// identical inputs and identical seeding reproduce identical models.
    /// Deterministic learners ignore it.
    fn fit(
        &mut self,
        data: &[f64],
        n_features: usize,
        targets: &[f64],
        rng: &mut dyn RngCore,
    ) -> crate::Result<()>;

    /// Predict one value per row of `data`, in row order.
    fn predict(&self, data: &[f64], n_features: usize) -> crate::Result<Vec<f64>>;

    /// Whether a successful `fit` has happened.
    fn is_fitted(&self) -> bool;
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
