//! Structured error types for the treebag learners.

use thiserror::Error;

/// Unified error type for all treebag operations.
#[derive(Debug, Error)]
pub enum TreebagError {
    /// Invalid input (shape mismatch, empty data, out-of-range hyperparameters)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A prediction or inspection was requested before a successful fit
    #[error("not fitted: {0}")]
    NotFitted(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl TreebagError {
    /// Whether this error signals a learner that has not been trained yet.
    pub fn is_not_fitted(&self) -> bool {
        matches!(self, Self::NotFitted(_))
    }
}

/// Convenience alias used throughout the treebag crates.
pub type Result<T> = std::result::Result<T, TreebagError>;
