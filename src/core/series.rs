//! Series and train/holdout split structures.

use crate::error::{DetectiveError, Result};
use serde::{Deserialize, Serialize};

/// An ordered, immutable sequence of real-valued observations.
///
/// Transformations never mutate a series in place; every mapping produces a
/// new `Series`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    /// Create a series from raw values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Get the observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the observations in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Smallest observation, `None` for an empty series.
    ///
    /// NaN if any observation is NaN.
    pub fn min(&self) -> Option<f64> {
        self.extreme(f64::INFINITY, f64::min)
    }

    /// Largest observation, `None` for an empty series.
    ///
    /// NaN if any observation is NaN.
    pub fn max(&self) -> Option<f64> {
        self.extreme(f64::NEG_INFINITY, f64::max)
    }

    fn extreme(&self, init: f64, pick: fn(f64, f64) -> f64) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        if self.values.iter().any(|v| v.is_nan()) {
            return Some(f64::NAN);
        }
        Some(self.values.iter().copied().fold(init, pick))
    }

    /// Arithmetic mean, `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Apply `f` to every observation, producing a new series.
    pub fn map<F>(&self, f: F) -> Series
    where
        F: Fn(f64) -> f64,
    {
        self.values.iter().map(|&x| f(x)).collect()
    }

    /// Combine two equally long series position by position.
    pub fn zip_with<F>(&self, other: &[f64], f: F) -> Result<Series>
    where
        F: Fn(f64, f64) -> f64,
    {
        if other.len() != self.len() {
            return Err(DetectiveError::DimensionMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        Ok(self
            .values
            .iter()
            .zip(other.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }

    /// Split into a training prefix and a holdout suffix of `holdout_length`
    /// observations.
    pub fn split(&self, holdout_length: usize) -> Result<Split> {
        if holdout_length == 0 {
            return Err(DetectiveError::InvalidParameter(
                "holdout_length must be positive".to_string(),
            ));
        }
        let n = self.len();
        if holdout_length >= n {
            return Err(DetectiveError::InsufficientData {
                needed: holdout_length + 1,
                got: n,
            });
        }

        let (train, holdout) = self.values.split_at(n - holdout_length);
        Ok(Split {
            train: Series::from(train),
            holdout: Series::from(holdout),
        })
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for Series {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Series {
    fn from(values: [f64; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// A transformed series cut into a training prefix and a holdout suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Observations the baseline is fitted on.
    pub train: Series,
    /// Observations withheld to score the forecast.
    pub holdout: Series,
}

impl Split {
    /// Total number of observations across both parts.
    pub fn len(&self) -> usize {
        self.train.len() + self.holdout.len()
    }

    /// Check if both parts are empty.
    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.holdout.is_empty()
    }
}
