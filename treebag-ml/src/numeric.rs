//! Numeric helpers shared by the split selectors, tree builder and bagging.
//!
//! All helpers work on a gathered column or on a subset of row indices into a
//! flat row-major matrix, so the builder never copies the feature matrix.

use rand::{Rng, RngCore};

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of `targets` over the given row indices. Returns 0.0 for no rows.
pub fn subset_mean(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

/// Median with the usual convention: the middle value for odd lengths, the
/// average of the two middle values for even lengths. Returns 0.0 for an
/// empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Pearson product-moment correlation between `x` and `y`.
///
/// Returns 0.0 if the series differ in length, have fewer than two points,
/// or either one has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    cov / denom
}

/// Whether every value is identical (vacuously true for fewer than two).
pub fn all_equal(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Whether `targets` takes a single value over the given row indices.
pub fn subset_all_equal(targets: &[f64], indices: &[usize]) -> bool {
    match indices.split_first() {
        Some((&first, rest)) => rest.iter().all(|&i| targets[i] == targets[first]),
        None => true,
    }
}

/// Gather one feature column for the given rows of a flat row-major matrix.
pub fn gather_column(data: &[f64], n_features: usize, indices: &[usize], feature: usize) -> Vec<f64> {
    indices
        .iter()
        .map(|&i| data[i * n_features + feature])
        .collect()
}

/// Gather the responses for the given rows.
pub fn gather_targets(targets: &[f64], indices: &[usize]) -> Vec<f64> {
    indices.iter().map(|&i| targets[i]).collect()
}

/// Draw `n` row indices uniformly from `0..n` with replacement.
pub fn bootstrap_indices(rng: &mut dyn RngCore, n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}

/// Materialize the resampled rows and responses picked by `indices`.
pub fn resample_rows(
    data: &[f64],
    n_features: usize,
    targets: &[f64],
    indices: &[usize],
) -> (Vec<f64>, Vec<f64>) {
    let mut rows = Vec::with_capacity(indices.len() * n_features);
    for &i in indices {
        rows.extend_from_slice(&data[i * n_features..(i + 1) * n_features]);
    }
    (rows, gather_targets(targets, indices))
}
