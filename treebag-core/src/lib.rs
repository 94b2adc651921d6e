//! Shared primitives and traits for the treebag learners.
//!
//! `treebag-core` provides the foundation that the learner crate builds on:
//!
//! - **Error types** — [`TreebagError`] and [`Result`] for structured error handling
//! - **Traits** — [`Regressor`], the fit/predict capability ensembles compose over,
//!   and [`Summarizable`]
//! - **Validation** — shape checks for flat row-major feature matrices

pub mod error;
pub mod traits;
pub mod validate;

pub use error::{Result, TreebagError};
pub use traits::*;
pub use validate::{validate_features, validate_training};
