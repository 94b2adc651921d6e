//! Shape validation for flat row-major feature matrices.

use crate::{Result, TreebagError};

/// Check that `data` is a whole number of rows of width `n_features` and
/// return the row count. An empty matrix is accepted and has zero rows.
pub fn validate_features(data: &[f64], n_features: usize) -> Result<usize> {
    if n_features == 0 {
        return Err(TreebagError::InvalidInput("n_features must be > 0".into()));
    }
    if data.len() % n_features != 0 {
        return Err(TreebagError::InvalidInput(format!(
            "data length {} not divisible by n_features {}",
            data.len(),
            n_features
        )));
    }
    Ok(data.len() / n_features)
}

/// Check a training pair: non-empty features, consistent width, and one
/// target per row. Returns the number of samples.
pub fn validate_training(data: &[f64], n_features: usize, targets: &[f64]) -> Result<usize> {
    if data.is_empty() {
        return Err(TreebagError::InvalidInput("empty data".into()));
    }
    let n_samples = validate_features(data, n_features)?;
    if targets.len() != n_samples {
        return Err(TreebagError::InvalidInput(format!(
            "targets length {} != n_samples {}",
            targets.len(),
            n_samples
        )));
    }
    Ok(n_samples)
}
