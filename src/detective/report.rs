//! Summary of a complete investigation run.

use serde::Serialize;

/// Outcome of [`Detective::investigate`](super::Detective::investigate).
///
/// All ratio vectors are ordered like the transformation list. The
/// foundation and comparison vectors may be shorter when fewer foundation
/// errors were supplied than there are transformations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectiveReport {
    /// Display names of the transformations.
    pub transformations: Vec<String>,
    pub holdout_length: usize,
    pub seasonality: usize,
    /// Display name of the baseline forecaster.
    pub baseline: String,
    /// Original over transformed baseline error, per transformation.
    pub baseline_ratios: Vec<f64>,
    /// Original over transformed foundation error, per transformation.
    pub foundation_ratios: Vec<f64>,
    /// Baseline ratio over foundation ratio, per transformation.
    pub comparison: Vec<f64>,
}

/// One transformation's line in a [`DetectiveReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow<'a> {
    pub transformation: &'a str,
    pub baseline_ratio: f64,
    pub foundation_ratio: f64,
    pub comparison: f64,
}

impl DetectiveReport {
    /// Rows for the transformations that have all three ratios.
    pub fn rows(&self) -> Vec<ReportRow<'_>> {
        self.transformations
            .iter()
            .zip(&self.baseline_ratios)
            .zip(&self.foundation_ratios)
            .zip(&self.comparison)
            .map(|(((name, &b), &f), &c)| ReportRow {
                transformation: name,
                baseline_ratio: b,
                foundation_ratio: f,
                comparison: c,
            })
            .collect()
    }

    /// Transformations whose comparison deviates from 1 by more than
    /// `tolerance`, or is not finite.
    pub fn divergent(&self, tolerance: f64) -> Vec<&str> {
        self.rows()
            .into_iter()
            .filter(|row| !row.comparison.is_finite() || (row.comparison - 1.0).abs() > tolerance)
            .map(|row| row.transformation)
            .collect()
    }
}
