//! Baseline forecasting models.

mod traits;

pub mod arima;
pub mod baseline;

pub use traits::{BaselineSpec, BoxedForecaster, Forecaster};
