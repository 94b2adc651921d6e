//! Regression trees and bootstrap-aggregated ensembles.
//!
//! - **Split selection** — [`CorrelationSplit`] and [`RandomSplit`] behind the
//!   [`SplitSelector`] capability
//! - **Trees** — [`TreeRegressor`], a binary regression tree stored as a
//!   pre-order flattened node array
//! - **Bagging** — [`BagRegressor`], averaging any [`Regressor`] trained on
//!   bootstrap resamples
//! - **Metrics** — RMSE, MAE, R² and prediction correlation
//!
//! Feature matrices are flat row-major `&[f64]` slices with an explicit
//! `n_features`; every `fit` takes the random source explicitly.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use treebag_ml::{BagConfig, BagRegressor, RandomTreeRegressor};
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let targets = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//!
//! let mut bag = BagRegressor::new(RandomTreeRegressor::with_leaf_size(1), BagConfig { n_bags: 10 });
//! bag.fit(&data, 1, &targets, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
//! let preds = bag.predict(&[1.5, 5.5], 1).unwrap();
//! assert_eq!(preds.len(), 2);
//! ```

pub mod bagging;
pub mod metrics;
pub mod numeric;
pub mod split;
pub mod tree;

pub use bagging::{BagConfig, BagRegressor};
pub use split::{CorrelationSplit, RandomSplit, SplitSelector};
pub use tree::{DecisionTreeRegressor, RandomTreeRegressor, TreeConfig, TreeNode, TreeRegressor};
pub use treebag_core::{Regressor, Result, Summarizable, TreebagError};
