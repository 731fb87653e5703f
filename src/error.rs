//! Error types for the tsdetective library.

use thiserror::Error;

/// Result type alias for detective operations.
pub type Result<T> = std::result::Result<T, DetectiveError>;

/// Errors that can occur while transforming series, fitting baselines or
/// combining error ratios.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectiveError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two sequences that must line up have different lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A scalar and a sequence were combined where the call shape forbids it.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Computation error (e.g., no admissible model).
    #[error("computation error: {0}")]
    ComputationError(String),
}
