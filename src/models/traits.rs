//! Forecaster trait and the baseline factory used by the detective.

use std::fmt;

use crate::core::{Forecast, Series};
use crate::error::Result;
use crate::models::arima::AutoARIMA;
use crate::models::baseline::SeasonalNaive;

/// Common interface for baseline forecasting models.
///
/// Models are stateful across `fit` and `predict`; use one instance per
/// fitted series. The trait is object-safe and can be used with
/// `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the series.
    fn fit(&mut self, series: &Series) -> Result<()>;

    /// Forecast `horizon` steps past the end of the fitted series.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;

type Factory = Box<dyn Fn(usize) -> BoxedForecaster + Send + Sync>;

/// Named factory for the baseline model of an experiment.
///
/// The factory receives the experiment's seasonality and must return a
/// fresh, unfitted model on every call.
///
/// # Example
///
/// ```
/// use tsdetective::models::{BaselineSpec, Forecaster};
/// use tsdetective::models::baseline::SeasonalNaive;
///
/// let spec = BaselineSpec::new("Naive", |_| Box::new(SeasonalNaive::new(1)));
/// let model = spec.create(12);
/// assert_eq!(model.name(), "SeasonalNaive");
/// assert!(!model.is_fitted());
/// ```
pub struct BaselineSpec {
    name: String,
    factory: Factory,
}

impl BaselineSpec {
    /// Create a baseline spec from a factory taking the seasonal period.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(usize) -> BoxedForecaster + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
        }
    }

    /// Automatic ARIMA with seasonal period set to the experiment seasonality.
    pub fn auto_arima() -> Self {
        Self::new("AutoARIMA", |period| Box::new(AutoARIMA::seasonal(period)))
    }

    /// Seasonal naive with period set to the experiment seasonality.
    pub fn seasonal_naive() -> Self {
        Self::new("SeasonalNaive", |period| Box::new(SeasonalNaive::new(period)))
    }

    /// Display name of the baseline.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a new, unfitted model instance.
    pub fn create(&self, seasonality: usize) -> BoxedForecaster {
        (self.factory)(seasonality)
    }
}

impl Default for BaselineSpec {
    fn default() -> Self {
        Self::auto_arima()
    }
}

impl fmt::Debug for BaselineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaselineSpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
