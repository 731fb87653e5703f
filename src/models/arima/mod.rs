//! ARIMA (Autoregressive Integrated Moving Average) models.
//!
//! This module provides:
//! - ARIMA models with (p, d, q) specifications
//! - AutoARIMA for automatic order selection with optional seasonal
//!   differencing

mod auto_arima;
mod diff;
mod model;

pub use auto_arima::{AutoARIMA, AutoARIMAConfig, ModelOrder, MIN_OBSERVATIONS};
pub use diff::{
    difference, integrate, seasonal_difference, seasonal_differencing_helps, seasonal_integrate,
    suggest_differencing,
};
pub use model::{ARIMASpec, ARIMA};
