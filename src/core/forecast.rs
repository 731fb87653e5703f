//! Forecast result structure for holding predictions.

/// A point forecast produced by a baseline model.
///
/// Only the mean path is kept; the detective scores forecasts on their point
/// predictions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    mean: Vec<f64>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(mean: Vec<f64>) -> Self {
        Self { mean }
    }

    /// Get the point predictions.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Consume the forecast and return its point predictions.
    pub fn into_mean(self) -> Vec<f64> {
        self.mean
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.mean.len()
    }

    /// Check if forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}
