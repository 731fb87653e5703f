//! ARIMA (Autoregressive Integrated Moving Average) model.

use crate::core::{Forecast, Series};
use crate::error::{DetectiveError, Result};
use crate::models::arima::diff::{difference, integrate};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};

/// ARIMA model specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ARIMASpec {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ARIMASpec {
    /// Create a new ARIMA specification.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Number of estimated coefficients (AR + MA + intercept).
    pub fn num_params(&self) -> usize {
        self.p + self.q + 1
    }

    /// Shortest series this specification can be fitted on.
    pub fn min_observations(&self) -> usize {
        self.d + self.p.max(self.q) + self.num_params() + 1
    }
}

/// ARIMA(p, d, q) fitted by conditional sum of squares.
///
/// The series is differenced `d` times; the differenced series is modelled
/// as an intercept plus AR terms on deviations from it plus MA terms on past
/// one-step errors.
#[derive(Debug, Clone)]
pub struct ARIMA {
    spec: ARIMASpec,
    ar: Vec<f64>,
    ma: Vec<f64>,
    intercept: f64,
    history: Option<Vec<f64>>,
    differenced: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    sigma2: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl ARIMA {
    /// Create a new, unfitted ARIMA model.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            spec: ARIMASpec::new(p, d, q),
            ar: Vec::new(),
            ma: Vec::new(),
            intercept: 0.0,
            history: None,
            differenced: None,
            residuals: None,
            fitted: None,
            sigma2: None,
            aic: None,
            bic: None,
        }
    }

    /// Get the model specification.
    pub fn spec(&self) -> ARIMASpec {
        self.spec
    }

    /// Get AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Get MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Get the intercept (mean of the differenced series).
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Residual variance of the fit.
    pub fn sigma2(&self) -> Option<f64> {
        self.sigma2
    }

    /// Get AIC.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Get BIC.
    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    /// Fit the model on raw values.
    pub fn fit_values(&mut self, values: &[f64]) -> Result<()> {
        let needed = self.spec.min_observations();
        if values.len() < needed {
            return Err(DetectiveError::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let (p, q) = (self.spec.p, self.spec.q);
        let w = difference(values, self.spec.d);
        let mean = w.iter().sum::<f64>() / w.len() as f64;

        if p == 0 && q == 0 {
            self.intercept = mean;
            self.ar.clear();
            self.ma.clear();
        } else {
            let mut initial = vec![mean];
            initial.extend((0..p).map(|i| 0.1 / (i + 1) as f64));
            initial.extend((0..q).map(|i| 0.1 / (i + 1) as f64));

            let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
            bounds.extend(std::iter::repeat((-0.99, 0.99)).take(p + q));

            let result = nelder_mead(
                |params| {
                    let residuals =
                        one_step_residuals(&w, p, q, &params[1..1 + p], &params[1 + p..], params[0]);
                    residuals.iter().map(|e| e * e).sum()
                },
                &initial,
                Some(&bounds),
                NelderMeadConfig {
                    max_iter: 1000,
                    tolerance: 1e-8,
                    ..Default::default()
                },
            );

            self.intercept = result.optimal_point[0];
            self.ar = result.optimal_point[1..1 + p].to_vec();
            self.ma = result.optimal_point[1 + p..].to_vec();
        }

        let start = p.max(q);
        let residuals = one_step_residuals(&w, p, q, &self.ar, &self.ma, self.intercept);
        let fitted = w
            .iter()
            .zip(&residuals)
            .enumerate()
            .map(|(t, (y, e))| if t < start { f64::NAN } else { y - e })
            .collect();

        let n_eff = (w.len() - start) as f64;
        let css: f64 = residuals[start..].iter().map(|e| e * e).sum();
        let sigma2 = (css / n_eff).max(f64::EPSILON);
        let k = self.spec.num_params() as f64;
        let log_likelihood =
            -0.5 * n_eff * (1.0 + (2.0 * std::f64::consts::PI * sigma2).ln());

        self.sigma2 = Some(sigma2);
        self.aic = Some(-2.0 * log_likelihood + 2.0 * k);
        self.bic = Some(-2.0 * log_likelihood + k * n_eff.ln());
        self.history = Some(values.to_vec());
        self.differenced = Some(w);
        self.residuals = Some(residuals);
        self.fitted = Some(fitted);

        Ok(())
    }

    /// Forecast `horizon` steps on the original scale.
    pub fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        let history = self.history.as_ref().ok_or(DetectiveError::FitRequired)?;
        let w = self.differenced.as_ref().ok_or(DetectiveError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(DetectiveError::FitRequired)?;

        let mut path = w.clone();
        let mut shocks = residuals.clone();
        for _ in 0..horizon {
            let t = path.len();
            let next = self.intercept
                + self
                    .ar
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| t > *i)
                    .map(|(i, phi)| phi * (path[t - 1 - i] - self.intercept))
                    .sum::<f64>()
                + self
                    .ma
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| t > *i)
                    .map(|(i, theta)| theta * shocks[t - 1 - i])
                    .sum::<f64>();
            path.push(next);
            shocks.push(0.0);
        }

        Ok(integrate(&path[w.len()..], history, self.spec.d))
    }
}

impl Default for ARIMA {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl Forecaster for ARIMA {
    fn fit(&mut self, series: &Series) -> Result<()> {
        self.fit_values(series.values())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        self.forecast(horizon).map(Forecast::from_values)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn name(&self) -> &str {
        "ARIMA"
    }
}

/// One-step-ahead errors of the differenced series; zero before the first
/// index with a full set of lags.
fn one_step_residuals(
    w: &[f64],
    p: usize,
    q: usize,
    ar: &[f64],
    ma: &[f64],
    intercept: f64,
) -> Vec<f64> {
    let start = p.max(q);
    let mut residuals = vec![0.0; w.len()];
    for t in start..w.len() {
        let mut pred = intercept;
        for i in 0..p {
            pred += ar[i] * (w[t - 1 - i] - intercept);
        }
        for i in 0..q {
            pred += ma[i] * residuals[t - 1 - i];
        }
        residuals[t] = w[t] - pred;
    }
    residuals
}
