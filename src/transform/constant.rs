//! Elementwise constant shifts and scalings.

use super::Transformation;
use crate::core::Series;
use crate::error::Result;

/// Adds `n` to every observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddConstant {
    n: f64,
}

impl AddConstant {
    pub fn new(n: f64) -> Self {
        Self { n }
    }

    pub fn n(&self) -> f64 {
        self.n
    }
}

impl Transformation for AddConstant {
    fn transform(&self, series: &Series) -> Result<Series> {
        Ok(series.map(|x| x + self.n))
    }

    fn name(&self) -> String {
        format!("AddConstant({})", self.n)
    }
}

/// Multiplies every observation by `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiplyConstant {
    n: f64,
}

impl MultiplyConstant {
    pub fn new(n: f64) -> Self {
        Self { n }
    }

    pub fn n(&self) -> f64 {
        self.n
    }
}

impl Transformation for MultiplyConstant {
    fn transform(&self, series: &Series) -> Result<Series> {
        Ok(series.map(|x| x * self.n))
    }

    fn name(&self) -> String {
        format!("MultiplyConstant({})", self.n)
    }
}

/// Subtracts `n` from every observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubtractConstant {
    n: f64,
}

impl SubtractConstant {
    pub fn new(n: f64) -> Self {
        Self { n }
    }

    pub fn n(&self) -> f64 {
        self.n
    }
}

impl Transformation for SubtractConstant {
    fn transform(&self, series: &Series) -> Result<Series> {
        Ok(series.map(|x| x - self.n))
    }

    fn name(&self) -> String {
        format!("SubtractConstant({})", self.n)
    }
}
