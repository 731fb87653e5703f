//! Baseline forecasting methods.

mod seasonal_naive;

pub use seasonal_naive::SeasonalNaive;
