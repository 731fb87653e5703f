//! Seasonal Naive forecasting model.
//!
//! Forecasts by repeating the last observed season.

use crate::core::{Forecast, Series};
use crate::error::{DetectiveError, Result};
use crate::models::Forecaster;

/// Seasonal Naive forecaster.
///
/// Each forecast equals the observation one (or more) seasonal periods
/// earlier. A period of 1 gives the plain naive forecast.
#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    period: usize,
    last_season: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
}

impl SeasonalNaive {
    /// Create a new SeasonalNaive model with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            last_season: None,
            fitted: None,
        }
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for SeasonalNaive {
    fn default() -> Self {
        Self::new(12)
    }
}

impl Forecaster for SeasonalNaive {
    fn fit(&mut self, series: &Series) -> Result<()> {
        let values = series.values();
        if values.len() < self.period {
            return Err(DetectiveError::InsufficientData {
                needed: self.period,
                got: values.len(),
            });
        }

        // y_hat[t] = y[t - period]
        let fitted = (0..values.len())
            .map(|t| {
                if t < self.period {
                    f64::NAN
                } else {
                    values[t - self.period]
                }
            })
            .collect();

        self.last_season = Some(values[values.len() - self.period..].to_vec());
        self.fitted = Some(fitted);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let season = self.last_season.as_ref().ok_or(DetectiveError::FitRequired)?;
        Ok(Forecast::from_values(
            (0..horizon).map(|h| season[h % self.period]).collect(),
        ))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn name(&self) -> &str {
        "SeasonalNaive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasonal_naive_repeats_last_season() {
        let series = Series::from([1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0]);
        let mut model = SeasonalNaive::new(4);
        model.fit(&series).unwrap();

        let forecast = model.predict(6).unwrap();
        assert_eq!(forecast.mean(), &[10.0, 20.0, 30.0, 40.0, 10.0, 20.0]);
    }

    #[test]
    fn seasonal_naive_period_one_is_naive() {
        let series = Series::from([3.0, 5.0, 8.0]);
        let mut model = SeasonalNaive::new(1);
        model.fit(&series).unwrap();

        assert_eq!(model.predict(3).unwrap().mean(), &[8.0, 8.0, 8.0]);
        assert_eq!(model.fitted_values().unwrap()[1], 3.0);
    }

    #[test]
    fn seasonal_naive_zero_period_is_clamped() {
        assert_eq!(SeasonalNaive::new(0).period(), 1);
        assert_eq!(SeasonalNaive::default().period(), 12);
    }

    #[test]
    fn seasonal_naive_insufficient_data() {
        let mut model = SeasonalNaive::new(12);
        assert_eq!(
            model.fit(&Series::from([1.0; 5])),
            Err(DetectiveError::InsufficientData { needed: 12, got: 5 })
        );
    }

    #[test]
    fn seasonal_naive_requires_fit() {
        let model = SeasonalNaive::new(4);
        assert!(!model.is_fitted());
        assert_eq!(model.predict(2), Err(DetectiveError::FitRequired));
    }
}
