//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::models::Parameter;

/// Configuration for an analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cap on correlations returned, strongest first. Default: unlimited.
    pub max_correlations: Option<usize>,
    /// Compute seasonal patterns and seasonal insights. Default: true.
    pub include_seasonal: Option<bool>,
    /// Parameters to analyze. Empty means every parameter present in history.
    #[serde(default)]
    pub tracked_parameters: Vec<String>,
}

impl AnalysisConfig {
    pub fn effective_include_seasonal(&self) -> bool {
        self.include_seasonal
            .unwrap_or(constants::DEFAULT_INCLUDE_SEASONAL)
    }

    /// Tracked parameters parsed through the catalogue.
    pub fn tracked(&self) -> Vec<Parameter> {
        self.tracked_parameters
            .iter()
            .map(|name| Parameter::parse(name))
            .collect()
    }

    /// Whether `parameter` is in scope for analysis.
    pub fn is_tracked(&self, parameter: &Parameter) -> bool {
        self.tracked_parameters.is_empty() || self.tracked().contains(parameter)
    }
}
