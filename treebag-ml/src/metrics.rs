//! Regression evaluation metrics.
//!
//! Scores a prediction vector against the observed responses: RMSE, MAE,
//! R², and the Pearson correlation between predicted and actual values.

use treebag_core::{Result, TreebagError};

use crate::numeric::{mean, pearson};

// ---------------------------------------------------------------------------
// Standalone scalar metrics
// ---------------------------------------------------------------------------

/// Root mean squared error.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_pair(actual, predicted)?;
    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Ok((sse / actual.len() as f64).sqrt())
}

/// Mean absolute error.
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_pair(actual, predicted)?;
    let sae: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()).sum();
    Ok(sae / actual.len() as f64)
}

/// Coefficient of determination.
///
/// When `actual` is constant the score is 1.0 for a perfect prediction and
/// 0.0 otherwise.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_pair(actual, predicted)?;
    let m = mean(actual);
    let ss_tot: f64 = actual.iter().map(|a| (a - m).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

/// Pearson correlation between predictions and observed responses.
///
/// Returns 0.0 if either series is constant or has fewer than two values.
pub fn prediction_correlation(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_pair(actual, predicted)?;
    Ok(pearson(actual, predicted))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_pair(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(TreebagError::InvalidInput(format!(
            "actual and predicted length mismatch ({} vs {})",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(TreebagError::InvalidInput("empty input".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
