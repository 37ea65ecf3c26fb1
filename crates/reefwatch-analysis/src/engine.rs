//! One-call analysis pass over a subject's history.

use std::borrow::Cow;

use reefwatch_core::analysis_span;
use reefwatch_core::constants::VERSION;
use reefwatch_core::config::{AnalysisConfig, ReefwatchConfig};
use reefwatch_core::errors::{ConfigError, StorageError};
use reefwatch_core::models::{
    Classification, CorrelationResult, Insight, Measurement, Parameter, SeasonalPattern,
    TankCategory, ThresholdProfile, TrendResult, WaterTest,
};
use reefwatch_core::traits::IMeasurementHistory;
use serde::Serialize;

use crate::classifier::{classify_measurement, ClassifiedMeasurement};
use crate::correlation::correlate_history;
use crate::insights::{generate_insights, generate_insights_with_seasonal};
use crate::seasonal::aggregate_by_season;
use crate::series;
use crate::trend::analyze_trend_with_band;

/// Everything the analysis pass derives for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterQualityReport {
    pub subject_id: String,
    pub test_count: usize,
    /// Classification of the most recent measurement of each parameter.
    pub latest: Vec<ClassifiedMeasurement>,
    pub trends: Vec<TrendResult>,
    pub correlations: Vec<CorrelationResult>,
    pub seasonal: Vec<SeasonalPattern>,
    pub insights: Vec<Insight>,
    /// Worst of `latest`, or `None` for an empty history.
    pub worst: Option<Classification>,
    /// Crate version that produced the report.
    pub engine_version: &'static str,
}

impl WaterQualityReport {
    pub fn latest_for(&self, parameter: &Parameter) -> Option<&ClassifiedMeasurement> {
        self.latest
            .iter()
            .find(|c| &c.measurement.parameter == parameter)
    }

    pub fn trend_for(&self, parameter: &Parameter) -> Option<&TrendResult> {
        self.trends.iter().find(|t| &t.parameter == parameter)
    }
}

/// Stateless analysis pipeline bound to one threshold profile.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    profile: ThresholdProfile,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(
            AnalysisConfig::default(),
            ThresholdProfile::for_category(TankCategory::default()),
        )
    }
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig, profile: ThresholdProfile) -> Self {
        Self { config, profile }
    }

    /// Build from a loaded configuration, resolving its threshold profile.
    pub fn from_config(config: &ReefwatchConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.analysis.clone(), config.threshold_profile()?))
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn profile(&self) -> &ThresholdProfile {
        &self.profile
    }

    /// Run every analysis over `tests`. Out-of-order input is sorted first.
    pub fn analyze(&self, subject_id: &str, tests: &[WaterTest]) -> WaterQualityReport {
        let span = analysis_span!(subject_id, tests.len());
        let _guard = span.enter();

        let tests: Cow<'_, [WaterTest]> = if series::is_chronological(tests) {
            Cow::Borrowed(tests)
        } else {
            tracing::debug!("history out of order, sorting by timestamp");
            let mut sorted = tests.to_vec();
            sorted.sort_by_key(|t| t.timestamp);
            Cow::Owned(sorted)
        };

        let parameters: Vec<Parameter> = series::parameters_in(&tests)
            .into_iter()
            .filter(|p| self.config.is_tracked(p))
            .collect();

        let mut latest = Vec::with_capacity(parameters.len());
        let mut trends = Vec::new();
        let mut measurements: Vec<Measurement> = Vec::new();
        for parameter in &parameters {
            let points = series::series_for(&tests, parameter);
            if let Some(last) = points.last() {
                latest.push(ClassifiedMeasurement {
                    measurement: last.clone(),
                    classification: classify_measurement(last, &self.profile),
                });
            }
            if let Some(trend) = analyze_trend_with_band(&points, self.profile.band(parameter)) {
                trends.push(trend);
            }
            measurements.extend(points);
        }

        let mut correlations = correlate_history(&tests, &parameters);
        if let Some(max) = self.config.max_correlations {
            correlations.truncate(max);
        }

        let (seasonal, insights) = if self.config.effective_include_seasonal() {
            let seasonal = aggregate_by_season(&measurements);
            let insights = generate_insights_with_seasonal(&trends, &seasonal);
            (seasonal, insights)
        } else {
            (Vec::new(), generate_insights(&trends))
        };

        let worst = latest.iter().map(|c| c.classification).max();

        tracing::info!(
            parameters = parameters.len(),
            trends = trends.len(),
            correlations = correlations.len(),
            insights = insights.len(),
            worst = ?worst,
            "analysis complete"
        );

        WaterQualityReport {
            subject_id: subject_id.to_string(),
            test_count: tests.len(),
            latest,
            trends,
            correlations,
            seasonal,
            insights,
            worst,
            engine_version: VERSION,
        }
    }

    /// Fetch history from `source` and analyze it.
    pub fn analyze_subject(
        &self,
        source: &dyn IMeasurementHistory,
        subject_id: &str,
    ) -> Result<WaterQualityReport, StorageError> {
        let tests = source.tests(subject_id)?;
        Ok(self.analyze(subject_id, &tests))
    }
}
