//! # tsdetective
//!
//! Probes whether forecasting models have memorized the shape of a time
//! series. A set of simple, invertible transformations (shifts, scalings,
//! flips) is applied to a series; a classical baseline is refitted on each
//! transformed copy and its change in holdout error is compared with the
//! change observed for a pretrained foundation model.
//!
//! Ships an AutoARIMA and a seasonal naive baseline, STL/MSTL decomposition
//! for trend-preserving transformations, and serde-driven experiment
//! configuration.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod core;
pub mod detective;
pub mod error;
pub mod models;
pub mod seasonality;
pub mod transform;
pub mod utils;

pub use error::{DetectiveError, Result};

pub mod prelude {
    pub use crate::config::{BaselineKind, DetectiveConfig};
    pub use crate::core::{Forecast, Series, Split};
    pub use crate::detective::{Detective, DetectiveReport, Measure};
    pub use crate::error::{DetectiveError, Result};
    pub use crate::models::{BaselineSpec, Forecaster};
    pub use crate::seasonality::Decomposer;
    pub use crate::transform::{
        AddConstant, BoxedTransformation, Flip, MultiplyConstant, ResidualFlip, SubtractConstant,
        Transformation, TransformationSpec,
    };
}
