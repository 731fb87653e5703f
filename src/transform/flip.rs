//! Reflection transformations.

use std::fmt;

use super::Transformation;
use crate::core::Series;
use crate::error::{DetectiveError, Result};
use crate::seasonality::{Decomposer, MSTL};

/// Seasonal period used by [`ResidualFlip`] when none is configured.
pub const DEFAULT_RESIDUAL_PERIOD: usize = 12;

/// Reflects a series about its range while keeping it anchored on the
/// original minimum.
///
/// Computed as `f = -s` followed by `f + |min(f)| + min(s)`. When the
/// maximum of `s` is non-negative this equals `max(s) + min(s) - s`, so the
/// range is preserved and applying the flip twice gives back `s`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flip;

impl Transformation for Flip {
    fn transform(&self, series: &Series) -> Result<Series> {
        let original_min = series.min().ok_or(DetectiveError::EmptyData)?;
        let flipped = series.map(|x| -x);
        let flipped_min = flipped.min().ok_or(DetectiveError::EmptyData)?;
        let shift = flipped_min.abs() + original_min;
        Ok(flipped.map(|x| x + shift))
    }

    fn name(&self) -> String {
        "Flip".to_string()
    }
}

/// Negates the deviations from the trend while keeping the trend itself.
///
/// The trend comes from a seasonal-trend decomposition (MSTL by default)
/// and the output is `trend - (series - trend)`.
pub struct ResidualFlip {
    seasonal_period: usize,
    decomposer: Box<dyn Decomposer>,
}

impl ResidualFlip {
    /// Create a residual flip backed by MSTL.
    pub fn new(seasonal_period: usize) -> Self {
        Self::with_decomposer(seasonal_period, MSTL::new())
    }

    /// Create a residual flip backed by a custom decomposer.
    pub fn with_decomposer<D>(seasonal_period: usize, decomposer: D) -> Self
    where
        D: Decomposer + 'static,
    {
        Self {
            seasonal_period,
            decomposer: Box::new(decomposer),
        }
    }

    pub fn seasonal_period(&self) -> usize {
        self.seasonal_period
    }
}

impl Default for ResidualFlip {
    fn default() -> Self {
        Self::new(DEFAULT_RESIDUAL_PERIOD)
    }
}

impl fmt::Debug for ResidualFlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResidualFlip")
            .field("seasonal_period", &self.seasonal_period)
            .field("decomposer", &self.decomposer.name())
            .finish()
    }
}

impl Transformation for ResidualFlip {
    fn transform(&self, series: &Series) -> Result<Series> {
        if self.seasonal_period < 2 {
            return Err(DetectiveError::InvalidParameter(format!(
                "residual flip needs a seasonal period of at least 2, got {}",
                self.seasonal_period
            )));
        }
        if series.is_empty() {
            return Err(DetectiveError::EmptyData);
        }

        let parts = self
            .decomposer
            .decompose(series.values(), self.seasonal_period)?;
        series.zip_with(&parts.trend, |y, trend| trend - (y - trend))
    }

    fn name(&self) -> String {
        format!("ResidualFlip({})", self.seasonal_period)
    }
}
