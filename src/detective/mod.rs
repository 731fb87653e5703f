//! The detective workflow.
//!
//! A [`Detective`] applies every transformation to the original series,
//! splits each result into train and holdout, fits a fresh baseline on
//! every training prefix and compares the baseline's holdout error on the
//! original series with its error on each transformed one. Those baseline
//! ratios are then set against ratios computed from externally supplied
//! foundation-model errors.
//!
//! # Example
//!
//! ```
//! use tsdetective::detective::Detective;
//! use tsdetective::models::BaselineSpec;
//! use tsdetective::transform::{AddConstant, BoxedTransformation, MultiplyConstant};
//!
//! let series: Vec<f64> = (0..24)
//!     .map(|i| 20.0 + 0.5 * i as f64 + [0.0, 3.0, 1.0, 4.0][i % 4])
//!     .collect();
//! let transformations: Vec<BoxedTransformation> = vec![
//!     Box::new(AddConstant::new(5.0)),
//!     Box::new(MultiplyConstant::new(2.0)),
//! ];
//!
//! let mut detective = Detective::new(series, transformations, 4, 4)
//!     .with_baseline(BaselineSpec::seasonal_naive());
//!
//! let ratios = detective.compute_baseline_error_ratios().unwrap();
//! assert_eq!(ratios.len(), 2);
//! assert!(ratios.iter().all(|r| r.is_finite()));
//! ```

pub mod ratios;
mod report;

pub use ratios::Measure;
pub use report::{DetectiveReport, ReportRow};

use std::fmt;

use log::{debug, warn};

use crate::config::DetectiveConfig;
use crate::core::{Series, Split};
use crate::error::Result;
use crate::models::BaselineSpec;
use crate::transform::BoxedTransformation;
use crate::utils::metrics;

/// Orchestrates transformation, splitting, baseline fitting and ratio
/// comparison for one experiment.
pub struct Detective {
    original: Series,
    transformations: Vec<BoxedTransformation>,
    holdout_length: usize,
    seasonality: usize,
    baseline: BaselineSpec,
    transformed_series_split: Option<Vec<Split>>,
}

impl Detective {
    /// Create a detective with the default AutoARIMA baseline.
    ///
    /// Nothing is validated here; an unusable `holdout_length` surfaces the
    /// first time a series is split.
    pub fn new(
        original: impl Into<Series>,
        transformations: Vec<BoxedTransformation>,
        holdout_length: usize,
        seasonality: usize,
    ) -> Self {
        Self {
            original: original.into(),
            transformations,
            holdout_length,
            seasonality,
            baseline: BaselineSpec::default(),
            transformed_series_split: None,
        }
    }

    /// Build a detective from a declarative configuration.
    pub fn from_config(original: impl Into<Series>, config: &DetectiveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            original,
            config.build_transformations(),
            config.holdout_length,
            config.seasonality,
        )
        .with_baseline(config.baseline.spec()))
    }

    /// Replace the baseline forecaster.
    pub fn with_baseline(mut self, baseline: BaselineSpec) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn original(&self) -> &Series {
        &self.original
    }

    pub fn holdout_length(&self) -> usize {
        self.holdout_length
    }

    pub fn seasonality(&self) -> usize {
        self.seasonality
    }

    pub fn baseline(&self) -> &BaselineSpec {
        &self.baseline
    }

    /// Display names of the transformations, in order.
    pub fn transformation_names(&self) -> Vec<String> {
        self.transformations.iter().map(|t| t.name()).collect()
    }

    /// Transform and split the original series once per transformation.
    ///
    /// Always recomputes and overwrites the cached splits.
    pub fn generate_transformed_series(&mut self) -> Result<&[Split]> {
        let splits = self
            .transformations
            .iter()
            .map(|t| t.transform(&self.original)?.split(self.holdout_length))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "generated {} splits of {}/{} observations",
            splits.len(),
            self.original.len().saturating_sub(self.holdout_length),
            self.holdout_length
        );
        Ok(self.transformed_series_split.insert(splits).as_slice())
    }

    /// Cached splits, generating them first if they were never computed.
    pub fn transformed_series_split(&mut self) -> Result<&[Split]> {
        if self.transformed_series_split.is_none() {
            self.generate_transformed_series()?;
        }
        Ok(self.cached_splits().unwrap_or_default())
    }

    /// Cached splits without triggering generation.
    pub fn cached_splits(&self) -> Option<&[Split]> {
        self.transformed_series_split.as_deref()
    }

    /// Fit a fresh baseline on `series` and forecast the holdout horizon.
    pub fn fit_baseline_and_predict(&self, series: &Series) -> Result<Vec<f64>> {
        let mut model = self.baseline.create(self.seasonality);
        model.fit(series)?;
        debug!(
            "fitted {} on {} observations",
            model.name(),
            series.len()
        );
        Ok(model.predict(self.holdout_length)?.into_mean())
    }

    /// Original over transformed baseline holdout error, per transformation.
    ///
    /// Errors are percentage-normalized MAE. The original series is fitted
    /// even when there are no transformations.
    pub fn compute_baseline_error_ratios(&mut self) -> Result<Vec<f64>> {
        if self.transformed_series_split.is_none() {
            self.generate_transformed_series()?;
        }

        let original = self.original.split(self.holdout_length)?;
        let original_error = self.holdout_error(&original)?;

        let splits = self.cached_splits().unwrap_or_default();
        let ratios: Vec<f64> = self
            .holdout_errors(splits)?
            .into_iter()
            .map(|transformed_error| original_error / transformed_error)
            .collect();

        for (name, ratio) in self.transformations.iter().zip(&ratios) {
            if !ratio.is_finite() {
                warn!("baseline error ratio for {} is {}", name.name(), ratio);
            }
        }
        Ok(ratios)
    }

    /// Original over transformed foundation-model errors.
    ///
    /// See [`ratios::foundation_error_ratios`] for the shape rules.
    pub fn compute_foundation_error_ratios(
        original: impl Into<Measure>,
        transformed: impl Into<Measure>,
    ) -> Result<Vec<f64>> {
        let ratios = ratios::foundation_error_ratios(&original.into(), &transformed.into())?;
        warn_non_finite("foundation", &ratios);
        Ok(ratios)
    }

    /// Baseline ratios over foundation ratios.
    ///
    /// A sequence of baseline ratios gives a sequence, a single ratio gives a
    /// bare scalar. See [`ratios::compare`].
    pub fn compare_error_ratios(
        baseline: impl Into<Measure>,
        foundation: impl Into<Measure>,
    ) -> Result<Measure> {
        ratios::compare(&baseline.into(), &foundation.into())
    }

    /// `100 * mean((predictions - holdout)^2) / |mean(holdout)|`
    pub fn calculate_nmse(predictions: &[f64], holdout: &[f64]) -> f64 {
        metrics::nmse(predictions, holdout)
    }

    /// Run the whole comparison against supplied foundation-model errors.
    pub fn investigate(
        &mut self,
        foundation_original: impl Into<Measure>,
        foundation_transformed: impl Into<Measure>,
    ) -> Result<DetectiveReport> {
        let baseline_ratios = self.compute_baseline_error_ratios()?;
        let foundation_ratios =
            Self::compute_foundation_error_ratios(foundation_original, foundation_transformed)?;
        let comparison = ratios::compare_many(
            &baseline_ratios,
            &Measure::Sequence(foundation_ratios.clone()),
        );
        warn_non_finite("comparison", &comparison);

        Ok(DetectiveReport {
            transformations: self.transformation_names(),
            holdout_length: self.holdout_length,
            seasonality: self.seasonality,
            baseline: self.baseline.name().to_string(),
            baseline_ratios,
            foundation_ratios,
            comparison,
        })
    }

    fn holdout_error(&self, split: &Split) -> Result<f64> {
        let predictions = self.fit_baseline_and_predict(&split.train)?;
        Ok(metrics::percentage_mae(&predictions, split.holdout.values()))
    }

    #[cfg(feature = "parallel")]
    fn holdout_errors(&self, splits: &[Split]) -> Result<Vec<f64>> {
        use rayon::prelude::*;

        splits
            .par_iter()
            .map(|split| self.holdout_error(split))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn holdout_errors(&self, splits: &[Split]) -> Result<Vec<f64>> {
        splits.iter().map(|split| self.holdout_error(split)).collect()
    }
}

fn warn_non_finite(label: &str, ratios: &[f64]) {
    for (i, ratio) in ratios.iter().enumerate() {
        if !ratio.is_finite() {
            warn!("{} ratio {} is {}", label, i, ratio);
        }
    }
}

impl fmt::Debug for Detective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detective")
            .field("original_len", &self.original.len())
            .field("transformations", &self.transformation_names())
            .field("holdout_length", &self.holdout_length)
            .field("seasonality", &self.seasonality)
            .field("baseline", &self.baseline.name())
            .field(
                "cached_splits",
                &self.transformed_series_split.as_ref().map(Vec::len),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectiveError;
    use crate::transform::{AddConstant, Flip, MultiplyConstant, Transformation};
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Identity transformation that counts its invocations.
    struct Counting(Arc<AtomicUsize>);

    impl Transformation for Counting {
        fn transform(&self, series: &Series) -> Result<Series> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(series.clone())
        }

        fn name(&self) -> String {
            "Counting".to_string()
        }
    }

    fn seasonal_series() -> Vec<f64> {
        (0..24)
            .map(|i| 20.0 + 0.5 * i as f64 + [0.0, 3.0, 1.0, 4.0][i % 4])
            .collect()
    }

    fn naive_detective(transformations: Vec<BoxedTransformation>) -> Detective {
        Detective::new(seasonal_series(), transformations, 4, 4)
            .with_baseline(BaselineSpec::seasonal_naive())
    }

    #[test]
    fn splits_have_expected_lengths() {
        let mut detective = naive_detective(vec![Box::new(AddConstant::new(1.0)), Box::new(Flip)]);
        let splits = detective.generate_transformed_series().unwrap();

        assert_eq!(splits.len(), 2);
        for split in splits {
            assert_eq!(split.train.len(), 20);
            assert_eq!(split.holdout.len(), 4);
        }
        assert_eq!(splits[0].holdout.values()[0], seasonal_series()[20] + 1.0);
    }

    #[test]
    fn cache_is_lazy_and_reused() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut detective = naive_detective(vec![Box::new(Counting(Arc::clone(&calls)))]);
        assert!(detective.cached_splits().is_none());

        detective.compute_baseline_error_ratios().unwrap();
        detective.compute_baseline_error_ratios().unwrap();
        detective.transformed_series_split().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        detective.generate_transformed_series().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_transformation_list_caches_empty_splits() {
        let mut detective = naive_detective(Vec::new());
        let ratios = detective.compute_baseline_error_ratios().unwrap();

        assert!(ratios.is_empty());
        assert_eq!(detective.cached_splits(), Some(&[][..]));
    }

    #[test]
    fn empty_transformation_list_still_fits_original() {
        let mut detective = Detective::new(vec![1.0, 2.0, 3.0], Vec::new(), 1, 12)
            .with_baseline(BaselineSpec::seasonal_naive());
        assert_eq!(
            detective.compute_baseline_error_ratios(),
            Err(DetectiveError::InsufficientData { needed: 12, got: 2 })
        );
    }

    #[test]
    fn invalid_holdout_surfaces_at_split_time() {
        let mut zero = naive_detective(vec![Box::new(Flip)]);
        zero.holdout_length = 0;
        assert!(matches!(
            zero.generate_transformed_series(),
            Err(DetectiveError::InvalidParameter(_))
        ));

        let mut too_long = Detective::new(vec![1.0, 2.0, 3.0], vec![Box::new(Flip)], 3, 1);
        assert_eq!(
            too_long.generate_transformed_series().unwrap_err(),
            DetectiveError::InsufficientData { needed: 4, got: 3 }
        );
        assert!(too_long.cached_splits().is_none());
    }

    #[test]
    fn seasonal_naive_ratios_are_exact() {
        let mut detective = naive_detective(vec![
            Box::new(AddConstant::new(5.0)),
            Box::new(MultiplyConstant::new(2.0)),
        ]);
        let ratios = detective.compute_baseline_error_ratios().unwrap();

        let holdout = &seasonal_series()[20..];
        let holdout_mean = holdout.iter().sum::<f64>() / 4.0;
        assert_relative_eq!(
            ratios[0],
            (holdout_mean + 5.0).abs() / holdout_mean.abs(),
            epsilon = 1e-10
        );
        assert_relative_eq!(ratios[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn baseline_predictions_cover_holdout() {
        let detective = naive_detective(Vec::new());
        let predictions = detective
            .fit_baseline_and_predict(&Series::from(&seasonal_series()[..20]))
            .unwrap();
        assert_eq!(predictions.len(), 4);
    }

    #[test]
    fn nmse_of_perfect_forecast_is_zero() {
        let holdout = [3.0, 4.0, 5.0];
        assert_eq!(Detective::calculate_nmse(&holdout, &holdout), 0.0);
        assert_relative_eq!(
            Detective::calculate_nmse(&[4.0, 4.0, 4.0], &holdout),
            100.0 * (2.0 / 3.0) / 4.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn static_ratio_entry_points() {
        assert_eq!(
            Detective::compute_foundation_error_ratios(10.0, vec![2.0, 5.0]).unwrap(),
            vec![5.0, 2.0]
        );
        assert_eq!(
            Detective::compute_foundation_error_ratios(10.0, 5.0).unwrap(),
            vec![2.0]
        );
        assert_eq!(
            Detective::compare_error_ratios(vec![4.0, 6.0], vec![2.0, 3.0]).unwrap(),
            Measure::Sequence(vec![2.0, 2.0])
        );
        assert_eq!(
            Detective::compare_error_ratios(4.0, 2.0).unwrap(),
            Measure::Scalar(2.0)
        );
    }

    #[test]
    fn investigate_assembles_report() {
        let mut detective = naive_detective(vec![
            Box::new(AddConstant::new(5.0)),
            Box::new(MultiplyConstant::new(2.0)),
        ]);
        let report = detective.investigate(vec![2.0, 2.0], vec![1.0, 2.0]).unwrap();

        assert_eq!(report.transformations, vec!["AddConstant(5)", "MultiplyConstant(2)"]);
        assert_eq!(report.baseline, "SeasonalNaive");
        assert_eq!(report.foundation_ratios, vec![2.0, 1.0]);
        assert_eq!(report.comparison.len(), 2);
        assert_relative_eq!(report.comparison[1], report.baseline_ratios[1], epsilon = 1e-12);
    }

    #[test]
    fn from_config_applies_settings() {
        let config = DetectiveConfig::new(4, 4)
            .with_baseline(crate::config::BaselineKind::SeasonalNaive)
            .with_transformation(crate::transform::TransformationSpec::Flip);
        let detective = Detective::from_config(seasonal_series(), &config).unwrap();

        assert_eq!(detective.transformation_names(), vec!["Flip"]);
        assert_eq!(detective.baseline().name(), "SeasonalNaive");
        assert_eq!(detective.holdout_length(), 4);
        assert_eq!(detective.seasonality(), 4);
        assert_eq!(detective.original().len(), 24);
    }

    #[test]
    fn debug_lists_transformations() {
        let detective = naive_detective(vec![Box::new(Flip)]);
        let rendered = format!("{:?}", detective);
        assert!(rendered.contains("Flip"));
        assert!(rendered.contains("SeasonalNaive"));
    }
}
