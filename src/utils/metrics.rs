//! Accuracy metrics used to score baseline forecasts.
//!
//! Both metrics normalize by the absolute holdout mean and scale to percent.
//! A zero holdout mean is not guarded: the result is infinite or NaN, which
//! lets callers spot pathological series.

/// Arithmetic mean of a slice, NaN when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentage-normalized mean absolute error.
///
/// `100 * mean(|predicted - actual|) / |mean(actual)|`
///
/// Returns NaN if the slices are empty or of different lengths.
pub fn percentage_mae(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.len() != actual.len() || actual.is_empty() {
        return f64::NAN;
    }
    let mae = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).abs())
        .sum::<f64>()
        / actual.len() as f64;
    100.0 * mae / mean(actual).abs()
}

/// Percentage-normalized mean squared error.
///
/// `100 * mean((predicted - actual)^2) / |mean(actual)|`
///
/// Returns NaN if the slices are empty or of different lengths.
pub fn nmse(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.len() != actual.len() || actual.is_empty() {
        return f64::NAN;
    }
    let mse = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum::<f64>()
        / actual.len() as f64;
    100.0 * mse / mean(actual).abs()
}
