//! MSTL (Multiple Seasonal-Trend decomposition using LOESS).
//!
//! Each seasonal component is re-estimated in turn by running STL on the
//! series with every other seasonal component removed; the trend is taken
//! from the last STL pass.

use super::stl::STL;
use super::{Decomposer, Decomposition};
use crate::error::{DetectiveError, Result};

/// Result of MSTL decomposition.
#[derive(Debug, Clone)]
pub struct MSTLResult {
    /// Trend component.
    pub trend: Vec<f64>,
    /// Seasonal components, one per period.
    pub seasonal_components: Vec<Vec<f64>>,
    /// Periods matching `seasonal_components`, ascending.
    pub seasonal_periods: Vec<usize>,
    /// Remainder component.
    pub remainder: Vec<f64>,
}

impl MSTLResult {
    /// Sum of all seasonal components.
    pub fn total_seasonal(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.trend.len()];
        for component in &self.seasonal_components {
            for (t, s) in total.iter_mut().zip(component) {
                *t += s;
            }
        }
        total
    }
}

/// MSTL decomposition settings.
#[derive(Debug, Clone)]
pub struct MSTL {
    iterations: usize,
    robust: bool,
}

impl MSTL {
    /// Create an MSTL decomposer with two refinement iterations.
    pub fn new() -> Self {
        Self {
            iterations: 2,
            robust: false,
        }
    }

    /// Set number of refinement iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n.max(1);
        self
    }

    /// Use robust STL fits.
    pub fn robust(mut self) -> Self {
        self.robust = true;
        self
    }

    /// Decompose `series` for every period in `periods`.
    ///
    /// Periods are sorted and deduplicated. The series must cover two full
    /// cycles of the longest period.
    pub fn decompose_periods(&self, series: &[f64], periods: &[usize]) -> Result<MSTLResult> {
        let mut periods = periods.to_vec();
        periods.sort_unstable();
        periods.dedup();

        let longest = *periods.last().ok_or_else(|| {
            DetectiveError::InvalidParameter("at least one seasonal period is required".to_string())
        })?;
        let n = series.len();
        if n < 2 * longest {
            return Err(DetectiveError::InsufficientData {
                needed: 2 * longest,
                got: n,
            });
        }

        let mut seasonal_components = vec![vec![0.0; n]; periods.len()];
        let mut deseasonalized = series.to_vec();
        let mut trend = vec![0.0; n];

        for _ in 0..self.iterations {
            for (idx, &period) in periods.iter().enumerate() {
                for (d, s) in deseasonalized.iter_mut().zip(&seasonal_components[idx]) {
                    *d += s;
                }

                let stl = if self.robust {
                    STL::new(period).robust()
                } else {
                    STL::new(period)
                };
                let fit = stl.decompose(&deseasonalized)?;

                for (d, s) in deseasonalized.iter_mut().zip(&fit.seasonal) {
                    *d -= s;
                }
                seasonal_components[idx] = fit.seasonal;
                trend = fit.trend;
            }
        }

        let remainder = (0..n)
            .map(|i| series[i] - trend[i] - seasonal_components.iter().map(|s| s[i]).sum::<f64>())
            .collect();

        Ok(MSTLResult {
            trend,
            seasonal_components,
            seasonal_periods: periods,
            remainder,
        })
    }
}

impl Default for MSTL {
    fn default() -> Self {
        Self::new()
    }
}

impl Decomposer for MSTL {
    fn decompose(&self, series: &[f64], period: usize) -> Result<Decomposition> {
        let result = self.decompose_periods(series, &[period])?;
        let seasonal = result.total_seasonal();
        Ok(Decomposition {
            trend: result.trend,
            seasonal,
            remainder: result.remainder,
        })
    }

    fn name(&self) -> &str {
        "MSTL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn multi_seasonal_series(n: usize, periods: &[usize]) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let trend = 0.05 * i as f64;
                let seasonal: f64 = periods
                    .iter()
                    .enumerate()
                    .map(|(idx, &p)| {
                        5.0 / (idx + 1) as f64
                            * (2.0 * std::f64::consts::PI * i as f64 / p as f64).sin()
                    })
                    .sum();
                trend + seasonal
            })
            .collect()
    }

    #[test]
    fn mstl_two_periods_reconstruct() {
        let series = multi_seasonal_series(200, &[7, 24]);
        let result = MSTL::new().decompose_periods(&series, &[24, 7]).unwrap();

        assert_eq!(result.seasonal_periods, vec![7, 24]);
        assert_eq!(result.seasonal_components.len(), 2);
        let total = result.total_seasonal();
        for i in 0..series.len() {
            assert_relative_eq!(
                result.trend[i] + total[i] + result.remainder[i],
                series[i],
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn mstl_deduplicates_periods() {
        let series = multi_seasonal_series(120, &[12]);
        let result = MSTL::new()
            .with_iterations(3)
            .decompose_periods(&series, &[12, 12])
            .unwrap();
        assert_eq!(result.seasonal_periods, vec![12]);
    }

    #[test]
    fn mstl_insufficient_data() {
        assert_eq!(
            MSTL::new().decompose_periods(&[1.0; 30], &[7, 24]).unwrap_err(),
            DetectiveError::InsufficientData { needed: 48, got: 30 }
        );
    }

    #[test]
    fn mstl_requires_a_period() {
        assert!(matches!(
            MSTL::new().decompose_periods(&[1.0; 30], &[]),
            Err(DetectiveError::InvalidParameter(_))
        ));
    }

    #[test]
    fn mstl_as_decomposer_is_additive() {
        let series = multi_seasonal_series(48, &[12]);
        let parts = MSTL::new().robust().decompose(&series, 12).unwrap();

        assert_eq!(parts.trend.len(), 48);
        for i in 0..series.len() {
            assert_relative_eq!(
                parts.trend[i] + parts.seasonal[i] + parts.remainder[i],
                series[i],
                epsilon = 1e-9
            );
        }
    }
}
