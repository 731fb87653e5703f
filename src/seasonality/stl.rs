//! STL (Seasonal-Trend decomposition using LOESS).
//!
//! Follows the inner/outer loop structure of Cleveland et al. (1990):
//! cycle-subseries smoothing, a low-pass filter that keeps the seasonal
//! component centred, then trend smoothing of the deseasonalized series.

use super::Decomposition;
use crate::error::{DetectiveError, Result};

/// STL decomposition configuration.
#[derive(Debug, Clone)]
pub struct STL {
    period: usize,
    /// Seasonal LOESS span (ns), odd.
    seasonal_span: usize,
    /// Trend LOESS span (nt), odd.
    trend_span: usize,
    /// Low-pass LOESS span (nl), odd.
    low_pass_span: usize,
    inner_iterations: usize,
    /// Robustness iterations; 0 disables robust weighting.
    outer_iterations: usize,
}

impl STL {
    /// Create an STL decomposer for `period` with the usual default spans.
    pub fn new(period: usize) -> Self {
        let seasonal_span = 7;
        let trend_span = odd_ceil(1.5 * period as f64 / (1.0 - 1.5 / seasonal_span as f64));
        let low_pass_span = odd_ceil(period as f64);

        Self {
            period,
            seasonal_span,
            trend_span,
            low_pass_span,
            inner_iterations: 2,
            outer_iterations: 0,
        }
    }

    /// Set the seasonal span (rounded up to odd).
    pub fn with_seasonal_span(mut self, span: usize) -> Self {
        self.seasonal_span = odd_ceil(span as f64);
        self
    }

    /// Set the trend span (rounded up to odd).
    pub fn with_trend_span(mut self, span: usize) -> Self {
        self.trend_span = odd_ceil(span as f64);
        self
    }

    /// Set the number of inner iterations.
    pub fn with_inner_iterations(mut self, n: usize) -> Self {
        self.inner_iterations = n.max(1);
        self
    }

    /// Enable robust fitting with six outer iterations.
    pub fn robust(mut self) -> Self {
        self.outer_iterations = 6;
        self
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Decompose `series` into trend, seasonal and remainder.
    pub fn decompose(&self, series: &[f64]) -> Result<Decomposition> {
        if self.period < 2 {
            return Err(DetectiveError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {}",
                self.period
            )));
        }
        let n = series.len();
        if n < 2 * self.period {
            return Err(DetectiveError::InsufficientData {
                needed: 2 * self.period,
                got: n,
            });
        }

        let mut trend = vec![0.0; n];
        let mut seasonal = vec![0.0; n];
        let mut robustness = vec![1.0; n];

        for outer in 0..=self.outer_iterations {
            for _ in 0..self.inner_iterations {
                let detrended: Vec<f64> = series.iter().zip(&trend).map(|(y, t)| y - t).collect();
                let cycle = self.smooth_cycle_subseries(&detrended, &robustness);
                let low_pass = self.low_pass(&cycle);
                for i in 0..n {
                    seasonal[i] = cycle[i] - low_pass[i];
                }

                let deseasonalized: Vec<f64> =
                    series.iter().zip(&seasonal).map(|(y, s)| y - s).collect();
                trend = loess(&deseasonalized, self.trend_span, &robustness);
            }

            if outer < self.outer_iterations {
                let remainder: Vec<f64> = (0..n).map(|i| series[i] - trend[i] - seasonal[i]).collect();
                robustness = bisquare_weights(&remainder);
            }
        }

        let remainder = (0..n).map(|i| series[i] - trend[i] - seasonal[i]).collect();
        Ok(Decomposition {
            trend,
            seasonal,
            remainder,
        })
    }

    fn smooth_cycle_subseries(&self, detrended: &[f64], robustness: &[f64]) -> Vec<f64> {
        let n = detrended.len();
        let mut smoothed = vec![0.0; n];

        for offset in 0..self.period {
            let indices: Vec<usize> = (offset..n).step_by(self.period).collect();
            let values: Vec<f64> = indices.iter().map(|&i| detrended[i]).collect();
            let weights: Vec<f64> = indices.iter().map(|&i| robustness[i]).collect();

            for (&i, v) in indices.iter().zip(loess(&values, self.seasonal_span, &weights)) {
                smoothed[i] = v;
            }
        }

        smoothed
    }

    fn low_pass(&self, cycle: &[f64]) -> Vec<f64> {
        let once = moving_average(cycle, self.period);
        let twice = moving_average(&once, self.period);
        let thrice = moving_average(&twice, 3);
        loess(&thrice, self.low_pass_span, &vec![1.0; cycle.len()])
    }
}

impl Default for STL {
    fn default() -> Self {
        Self::new(12)
    }
}

fn odd_ceil(x: f64) -> usize {
    let v = (x.ceil() as usize).max(3);
    if v % 2 == 0 {
        v + 1
    } else {
        v
    }
}

/// Centred moving average; the window shrinks at the edges so the output
/// keeps the input length.
fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let half = window / 2;
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(n);
            values[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
        })
        .collect()
}

/// Tricube-weighted local linear regression over the `span` nearest points.
pub(crate) fn loess(values: &[f64], span: usize, robustness: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let q = span.clamp(1, n);

    (0..n)
        .map(|i| {
            let start = i.saturating_sub(q / 2).min(n - q);
            let end = start + q;
            let reach = (i - start).max(end - 1 - i) as f64;
            let h = (reach + (span.saturating_sub(n) / 2) as f64).max(1.0) * 1.001;

            let (mut sw, mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
            for j in start..end {
                let u = (j as f64 - i as f64).abs() / h;
                let w = (1.0 - u.powi(3)).powi(3) * robustness[j];
                let x = j as f64;
                sw += w;
                sx += w * x;
                sy += w * values[j];
                sxx += w * x * x;
                sxy += w * x * values[j];
            }

            if sw <= 0.0 {
                return values[i];
            }
            let x_bar = sx / sw;
            let y_bar = sy / sw;
            let spread = sxx / sw - x_bar * x_bar;
            if spread > 1e-10 {
                let slope = (sxy / sw - x_bar * y_bar) / spread;
                y_bar + slope * (i as f64 - x_bar)
            } else {
                y_bar
            }
        })
        .collect()
}

/// Bisquare robustness weights from the remainder, scaled by six times its
/// median absolute value.
fn bisquare_weights(remainder: &[f64]) -> Vec<f64> {
    let mut abs: Vec<f64> = remainder.iter().map(|r| r.abs()).collect();
    abs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = abs.len();
    let median = if n % 2 == 0 {
        (abs[n / 2 - 1] + abs[n / 2]) / 2.0
    } else {
        abs[n / 2]
    };
    let h = 6.0 * median;
    if h < 1e-10 {
        return vec![1.0; n];
    }

    remainder
        .iter()
        .map(|r| {
            let u = r.abs() / h;
            if u < 1.0 {
                (1.0 - u * u).powi(2)
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seasonal_series(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                0.1 * i as f64 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin()
            })
            .collect()
    }

    fn variance(values: &[f64]) -> f64 {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
    }

    #[test]
    fn stl_components_add_back_to_series() {
        let series = seasonal_series(120, 12);
        let result = STL::new(12).decompose(&series).unwrap();

        assert_eq!(result.trend.len(), series.len());
        for i in 0..series.len() {
            assert_relative_eq!(
                result.trend[i] + result.seasonal[i] + result.remainder[i],
                series[i],
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn stl_captures_seasonal_variance() {
        let series = seasonal_series(120, 12);
        let result = STL::new(12).decompose(&series).unwrap();

        // A unit-amplitude-10 sine has variance of about 50.
        assert!(variance(&result.seasonal) > 25.0);
    }

    #[test]
    fn stl_trend_only_has_small_seasonal() {
        let series: Vec<f64> = (0..100).map(|i| 5.0 + 0.5 * i as f64).collect();
        let result = STL::new(10).decompose(&series).unwrap();

        assert!(variance(&result.seasonal) < 0.1 * variance(&series));
    }

    #[test]
    fn stl_constant_series() {
        let series = vec![5.0; 60];
        let result = STL::new(12).decompose(&series).unwrap();

        for i in 0..series.len() {
            assert!(result.seasonal[i].abs() < 1e-6);
            assert!(result.remainder[i].abs() < 1e-6);
            assert_relative_eq!(result.trend[i], 5.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn stl_robust_survives_outliers() {
        let mut series = seasonal_series(120, 12);
        series[30] = 100.0;
        series[60] = -100.0;

        let result = STL::new(12).robust().decompose(&series).unwrap();
        assert!(result.trend.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn stl_custom_spans() {
        let series = seasonal_series(48, 12);
        let stl = STL::new(12)
            .with_seasonal_span(9)
            .with_trend_span(20)
            .with_inner_iterations(3);

        assert_eq!(stl.trend_span, 21);
        assert_eq!(stl.decompose(&series).unwrap().trend.len(), 48);
    }

    #[test]
    fn stl_insufficient_data() {
        assert_eq!(
            STL::new(12).decompose(&[1.0; 20]).unwrap_err(),
            DetectiveError::InsufficientData { needed: 24, got: 20 }
        );
    }

    #[test]
    fn stl_rejects_period_below_two() {
        assert!(matches!(
            STL::new(1).decompose(&[1.0; 20]),
            Err(DetectiveError::InvalidParameter(_))
        ));
    }

    #[test]
    fn loess_reproduces_a_line() {
        let line: Vec<f64> = (0..15).map(|i| 2.0 + 0.5 * i as f64).collect();
        let smoothed = loess(&line, 5, &[1.0; 15]);
        for (s, y) in smoothed.iter().zip(&line) {
            assert_relative_eq!(*s, *y, epsilon = 1e-9);
        }
    }
}
