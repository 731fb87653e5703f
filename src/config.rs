//! Declarative experiment configuration.
//!
//! A [`DetectiveConfig`] can be deserialized from any serde format and turned
//! into a [`Detective`](crate::detective::Detective) with
//! [`Detective::from_config`](crate::detective::Detective::from_config).
//!
//! ```
//! use tsdetective::config::{BaselineKind, DetectiveConfig};
//!
//! let config: DetectiveConfig = serde_json::from_str(r#"{
//!     "holdout_length": 6,
//!     "seasonality": 12,
//!     "transformations": [{"kind": "add_constant", "n": 5}]
//! }"#).unwrap();
//!
//! assert_eq!(config.baseline, BaselineKind::AutoArima);
//! assert_eq!(config.transformations.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DetectiveError, Result};
use crate::models::BaselineSpec;
use crate::transform::{BoxedTransformation, TransformationSpec};

/// Which shipped baseline forecaster to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineKind {
    #[default]
    AutoArima,
    SeasonalNaive,
}

impl BaselineKind {
    /// Factory for the selected baseline.
    pub fn spec(self) -> BaselineSpec {
        match self {
            Self::AutoArima => BaselineSpec::auto_arima(),
            Self::SeasonalNaive => BaselineSpec::seasonal_naive(),
        }
    }
}

/// Parameters of one detective experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectiveConfig {
    /// Number of trailing observations withheld for scoring.
    pub holdout_length: usize,
    /// Seasonal period handed to the baseline.
    pub seasonality: usize,
    #[serde(default)]
    pub baseline: BaselineKind,
    #[serde(default)]
    pub transformations: Vec<TransformationSpec>,
}

impl DetectiveConfig {
    pub fn new(holdout_length: usize, seasonality: usize) -> Self {
        Self {
            holdout_length,
            seasonality,
            baseline: BaselineKind::default(),
            transformations: Vec::new(),
        }
    }

    pub fn with_baseline(mut self, baseline: BaselineKind) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_transformation(mut self, spec: TransformationSpec) -> Self {
        self.transformations.push(spec);
        self
    }

    /// Check the parameters that do not depend on the series.
    pub fn validate(&self) -> Result<()> {
        if self.holdout_length == 0 {
            return Err(DetectiveError::InvalidParameter(
                "holdout_length must be positive".to_string(),
            ));
        }
        if self.seasonality == 0 {
            return Err(DetectiveError::InvalidParameter(
                "seasonality must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the configured transformations in order.
    pub fn build_transformations(&self) -> Vec<BoxedTransformation> {
        self.transformations.iter().map(TransformationSpec::build).collect()
    }
}
