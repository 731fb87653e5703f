//! Invertible series transformations.
//!
//! Every transformation maps a [`Series`] to a new series of the same
//! length without side effects. The detective applies each one to the
//! original series before splitting it into train and holdout.
//!
//! # Example
//!
//! ```
//! use tsdetective::core::Series;
//! use tsdetective::transform::{AddConstant, Flip, Transformation};
//!
//! let series = Series::from([1.0, 2.0, 3.0]);
//!
//! let shifted = AddConstant::new(5.0).transform(&series).unwrap();
//! assert_eq!(shifted.values(), &[6.0, 7.0, 8.0]);
//!
//! let flipped = Flip.transform(&series).unwrap();
//! assert_eq!(flipped.values(), &[3.0, 2.0, 1.0]);
//! ```

mod constant;
mod flip;

pub use constant::{AddConstant, MultiplyConstant, SubtractConstant};
pub use flip::{Flip, ResidualFlip, DEFAULT_RESIDUAL_PERIOD};

use serde::{Deserialize, Serialize};

use crate::core::Series;
use crate::error::Result;

/// A deterministic, side-effect free mapping from one series to another.
pub trait Transformation: Send + Sync {
    /// Apply the transformation, returning a new series.
    fn transform(&self, series: &Series) -> Result<Series>;

    /// Display name including parameters, e.g. `AddConstant(5)`.
    fn name(&self) -> String;
}

/// Type alias for boxed transformation trait objects.
pub type BoxedTransformation = Box<dyn Transformation>;

/// Declarative description of a transformation, as found in experiment
/// configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformationSpec {
    /// `series + n`
    AddConstant { n: f64 },
    /// `series * n`
    MultiplyConstant { n: f64 },
    /// `series - n`
    SubtractConstant { n: f64 },
    /// Reflection anchored on the series minimum.
    Flip,
    /// Trend-preserving residual negation.
    ResidualFlip {
        #[serde(default = "default_residual_period")]
        seasonal_period: usize,
    },
}

fn default_residual_period() -> usize {
    DEFAULT_RESIDUAL_PERIOD
}

impl TransformationSpec {
    /// Build the transformation this spec describes.
    pub fn build(&self) -> BoxedTransformation {
        match *self {
            Self::AddConstant { n } => Box::new(AddConstant::new(n)),
            Self::MultiplyConstant { n } => Box::new(MultiplyConstant::new(n)),
            Self::SubtractConstant { n } => Box::new(SubtractConstant::new(n)),
            Self::Flip => Box::new(Flip),
            Self::ResidualFlip { seasonal_period } => Box::new(ResidualFlip::new(seasonal_period)),
        }
    }
}
