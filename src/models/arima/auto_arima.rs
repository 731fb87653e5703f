//! Automatic ARIMA order selection with optional seasonal differencing.

use log::debug;

use crate::core::{Forecast, Series};
use crate::error::{DetectiveError, Result};
use crate::models::arima::diff::{
    seasonal_difference, seasonal_differencing_helps, seasonal_integrate, suggest_differencing,
};
use crate::models::arima::model::ARIMA;
use crate::models::Forecaster;

/// Fewest observations AutoARIMA accepts.
pub const MIN_OBSERVATIONS: usize = 10;

/// Configuration for AutoARIMA.
#[derive(Debug, Clone)]
pub struct AutoARIMAConfig {
    /// Maximum AR order to consider.
    pub max_p: usize,
    /// Maximum differencing order.
    pub max_d: usize,
    /// Maximum MA order to consider.
    pub max_q: usize,
    /// Seasonal period (0 or 1 for non-seasonal).
    pub seasonal_period: usize,
    /// Select by AIC when true, BIC otherwise.
    pub use_aic: bool,
}

impl Default for AutoARIMAConfig {
    fn default() -> Self {
        Self {
            max_p: 2,
            max_d: 2,
            max_q: 2,
            seasonal_period: 0,
            use_aic: true,
        }
    }
}

impl AutoARIMAConfig {
    /// Set maximum non-seasonal orders.
    pub fn with_max_orders(mut self, max_p: usize, max_d: usize, max_q: usize) -> Self {
        self.max_p = max_p;
        self.max_d = max_d;
        self.max_q = max_q;
        self
    }

    /// Set seasonal period.
    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = period;
        self
    }

    /// Select by BIC instead of AIC.
    pub fn use_bic(mut self) -> Self {
        self.use_aic = false;
        self
    }
}

/// Selected orders: ARIMA(p, d, q) on a series seasonally differenced
/// `seasonal_d` times at lag `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOrder {
    /// AR order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// MA order.
    pub q: usize,
    /// Seasonal differencing order (0 or 1).
    pub seasonal_d: usize,
    /// Seasonal period.
    pub s: usize,
}

/// Automatic ARIMA.
///
/// Seasonal differencing is considered only when the series spans at least
/// three seasons; `d` comes from a variance-ratio heuristic; `p` and `q` are
/// searched exhaustively up to the configured maxima and the lowest
/// information criterion wins.
#[derive(Debug, Clone)]
pub struct AutoARIMA {
    config: AutoARIMAConfig,
    model: Option<ARIMA>,
    order: Option<ModelOrder>,
    history: Option<Vec<f64>>,
    model_scores: Vec<(ModelOrder, f64)>,
}

impl AutoARIMA {
    /// Create a non-seasonal AutoARIMA with default configuration.
    pub fn new() -> Self {
        Self::with_config(AutoARIMAConfig::default())
    }

    /// Create AutoARIMA with custom configuration.
    pub fn with_config(config: AutoARIMAConfig) -> Self {
        Self {
            config,
            model: None,
            order: None,
            history: None,
            model_scores: Vec::new(),
        }
    }

    /// Create AutoARIMA with seasonal period.
    pub fn seasonal(period: usize) -> Self {
        Self::with_config(AutoARIMAConfig::default().with_seasonal_period(period))
    }

    /// Get the selected order.
    pub fn selected_order(&self) -> Option<ModelOrder> {
        self.order
    }

    /// Scores of every candidate that could be fitted, best first.
    pub fn model_scores(&self) -> &[(ModelOrder, f64)] {
        &self.model_scores
    }

    /// Fit on raw values.
    pub fn fit_values(&mut self, values: &[f64]) -> Result<()> {
        if values.len() < MIN_OBSERVATIONS {
            return Err(DetectiveError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: values.len(),
            });
        }

        let s = self.config.seasonal_period;
        let seasonal_d = usize::from(
            s > 1 && values.len() >= 3 * s && seasonal_differencing_helps(values, s),
        );
        let working = if seasonal_d == 1 {
            seasonal_difference(values, s)
        } else {
            values.to_vec()
        };
        let d = suggest_differencing(&working).min(self.config.max_d);

        self.model_scores.clear();
        let mut best: Option<(ARIMA, ModelOrder, f64)> = None;

        for p in 0..=self.config.max_p {
            for q in 0..=self.config.max_q {
                let mut candidate = ARIMA::new(p, d, q);
                if candidate.fit_values(&working).is_err() {
                    continue;
                }
                let score = if self.config.use_aic {
                    candidate.aic()
                } else {
                    candidate.bic()
                };
                let Some(score) = score.filter(|v| v.is_finite()) else {
                    continue;
                };

                let order = ModelOrder {
                    p,
                    d,
                    q,
                    seasonal_d,
                    s,
                };
                self.model_scores.push((order, score));
                if best.as_ref().map_or(true, |(_, _, b)| score < *b) {
                    best = Some((candidate, order, score));
                }
            }
        }

        self.model_scores
            .sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let (model, order, score) = best.ok_or_else(|| {
            DetectiveError::ComputationError("no admissible ARIMA model could be fitted".to_string())
        })?;
        debug!(
            "AutoARIMA selected ARIMA({},{},{}) seasonal_d={} s={} score={:.4}",
            order.p, order.d, order.q, order.seasonal_d, order.s, score
        );

        self.model = Some(model);
        self.order = Some(order);
        self.history = Some(values.to_vec());
        Ok(())
    }
}

impl Default for AutoARIMA {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster for AutoARIMA {
    fn fit(&mut self, series: &Series) -> Result<()> {
        self.fit_values(series.values())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let model = self.model.as_ref().ok_or(DetectiveError::FitRequired)?;
        let order = self.order.ok_or(DetectiveError::FitRequired)?;
        let history = self.history.as_ref().ok_or(DetectiveError::FitRequired)?;

        let forecast = model.forecast(horizon)?;
        let mean = if order.seasonal_d == 1 {
            seasonal_integrate(&forecast, history, order.s)
        } else {
            forecast
        };
        Ok(Forecast::from_values(mean))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.model.as_ref()?.fitted_values()
    }

    fn name(&self) -> &str {
        "AutoARIMA"
    }
}
