//! Numeric utilities shared by models and the detective.

pub mod metrics;
pub mod optimization;

pub use metrics::{mean, nmse, percentage_mae};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
