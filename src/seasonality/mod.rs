//! Seasonal-trend decomposition.
//!
//! This module provides:
//! - STL: Seasonal-Trend decomposition using LOESS
//! - MSTL: Multiple seasonal-trend decomposition for several periods
//! - The [`Decomposer`] trait consumed by residual-based transformations

mod mstl;
mod stl;

pub use mstl::{MSTLResult, MSTL};
pub use stl::STL;

use crate::error::Result;

/// Additive split of a series: `series = trend + seasonal + remainder`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Trend component.
    pub trend: Vec<f64>,
    /// Seasonal component (all periods combined).
    pub seasonal: Vec<f64>,
    /// Remainder component.
    pub remainder: Vec<f64>,
}

/// A seasonal-trend decomposition capability.
pub trait Decomposer: Send + Sync {
    /// Decompose `series` using the seasonal `period`.
    fn decompose(&self, series: &[f64], period: usize) -> Result<Decomposition>;

    /// Name used in logs.
    fn name(&self) -> &str;
}
