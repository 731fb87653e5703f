//! Ratio arithmetic over scalar and sequence error measures.
//!
//! Sequences are combined position by position and truncated to the shorter
//! side. A scalar paired with a sequence is broadcast. Division follows
//! IEEE-754, so a zero denominator yields an infinite or NaN entry rather
//! than an error.

use serde::{Deserialize, Serialize};

use crate::error::{DetectiveError, Result};

/// A single error value or an ordered sequence of them.
///
/// Serializes untagged: a JSON number is a `Scalar`, a JSON array a
/// `Sequence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Measure {
    /// The scalar value, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Sequence(_) => None,
        }
    }

    /// The sequence values, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[f64]> {
        match self {
            Self::Scalar(_) => None,
            Self::Sequence(v) => Some(v),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Flatten into a vector; a scalar becomes a one-element vector.
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![v],
            Self::Sequence(v) => v,
        }
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for Measure {
    fn from(values: Vec<f64>) -> Self {
        Self::Sequence(values)
    }
}

impl From<&[f64]> for Measure {
    fn from(values: &[f64]) -> Self {
        Self::Sequence(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Measure {
    fn from(values: [f64; N]) -> Self {
        Self::Sequence(values.to_vec())
    }
}

/// `original / transformed` against a sequence of transformed errors.
///
/// A scalar `original` is broadcast over every entry.
pub fn ratio_many(original: &Measure, transformed: &[f64]) -> Vec<f64> {
    match original {
        Measure::Scalar(o) => transformed.iter().map(|t| o / t).collect(),
        Measure::Sequence(o) => o.iter().zip(transformed).map(|(o, t)| o / t).collect(),
    }
}

/// `original / transformed` for a single pair, wrapped in a one-element
/// vector.
pub fn ratio_one(original: f64, transformed: f64) -> Vec<f64> {
    vec![original / transformed]
}

/// `baseline / foundation` for a sequence of baseline ratios.
///
/// A scalar `foundation` is broadcast over every entry.
pub fn compare_many(baseline: &[f64], foundation: &Measure) -> Vec<f64> {
    match foundation {
        Measure::Scalar(f) => baseline.iter().map(|b| b / f).collect(),
        Measure::Sequence(f) => baseline.iter().zip(f).map(|(b, f)| b / f).collect(),
    }
}

/// `baseline / foundation` for a single pair, returned bare.
pub fn compare_one(baseline: f64, foundation: f64) -> f64 {
    baseline / foundation
}

/// Ratio of original to transformed foundation-model errors.
///
/// Dispatches on the shape of `transformed`: a sequence goes through
/// [`ratio_many`], a scalar through [`ratio_one`]. A sequence of originals
/// against a single transformed error has no pairing and is rejected.
pub fn foundation_error_ratios(original: &Measure, transformed: &Measure) -> Result<Vec<f64>> {
    match (original, transformed) {
        (_, Measure::Sequence(t)) => Ok(ratio_many(original, t)),
        (Measure::Scalar(o), Measure::Scalar(t)) => Ok(ratio_one(*o, *t)),
        (Measure::Sequence(o), Measure::Scalar(_)) => Err(DetectiveError::ShapeMismatch(format!(
            "{} original errors cannot be paired with a single transformed error",
            o.len()
        ))),
    }
}

/// Ratio of baseline ratios to foundation ratios.
///
/// Dispatches on the shape of `baseline`: a sequence yields a sequence, a
/// scalar yields a bare scalar.
pub fn compare(baseline: &Measure, foundation: &Measure) -> Result<Measure> {
    match (baseline, foundation) {
        (Measure::Sequence(b), _) => Ok(Measure::Sequence(compare_many(b, foundation))),
        (Measure::Scalar(b), Measure::Scalar(f)) => Ok(Measure::Scalar(compare_one(*b, *f))),
        (Measure::Scalar(_), Measure::Sequence(f)) => Err(DetectiveError::ShapeMismatch(format!(
            "a single baseline ratio cannot be paired with {} foundation ratios",
            f.len()
        ))),
    }
}
