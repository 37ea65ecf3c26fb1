//! Top-level reefwatch configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AlertConfig, AnalysisConfig, ThresholdConfig};
use crate::errors::ConfigError;
use crate::models::{TankCategory, ThresholdProfile};

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "reefwatch.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`REEFWATCH_*`)
/// 3. Project config (`reefwatch.toml` in project root)
/// 4. User config (`~/.reefwatch/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReefwatchConfig {
    pub thresholds: ThresholdConfig,
    pub analysis: AnalysisConfig,
    pub alerts: AlertConfig,
}

/// Explicit overrides from the embedding application.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub category: Option<TankCategory>,
    pub max_correlations: Option<usize>,
    pub include_seasonal: Option<bool>,
    pub high_severity_fraction: Option<f64>,
    pub reactivate_on_read: Option<bool>,
    /// `Some(vec![])` clears a file-level list back to "every parameter".
    pub tracked_parameters: Option<Vec<String>>,
}

impl ReefwatchConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        Self::load_layers(Self::user_config_path().as_deref(), root, overrides)
    }

    /// Load with an explicit user config path instead of `~/.reefwatch/config.toml`.
    pub fn load_layers(
        user_config: Option<&Path>,
        root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = user_config {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ReefwatchConfig) -> Result<(), ConfigError> {
        if let Some(fraction) = config.alerts.high_severity_fraction {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ConfigError::ValidationFailed {
                    field: "alerts.high_severity_fraction".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.analysis.max_correlations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.max_correlations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        config.thresholds.resolve()?;
        Ok(())
    }

    /// Threshold profile for the configured category with overrides applied.
    pub fn threshold_profile(&self) -> Result<ThresholdProfile, ConfigError> {
        Ok(self.thresholds.resolve()?)
    }

    /// Returns the user config path: `~/.reefwatch/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".reefwatch").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut ReefwatchConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ReefwatchConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut ReefwatchConfig, other: &ReefwatchConfig) {
        // Thresholds
        if other.thresholds.category.is_some() {
            base.thresholds.category = other.thresholds.category;
        }
        for (name, band) in &other.thresholds.overrides {
            base.thresholds.overrides.insert(name.clone(), band.clone());
        }

        // Analysis
        if other.analysis.max_correlations.is_some() {
            base.analysis.max_correlations = other.analysis.max_correlations;
        }
        if other.analysis.include_seasonal.is_some() {
            base.analysis.include_seasonal = other.analysis.include_seasonal;
        }
        if !other.analysis.tracked_parameters.is_empty() {
            base.analysis.tracked_parameters = other.analysis.tracked_parameters.clone();
        }

        // Alerts
        if other.alerts.high_severity_fraction.is_some() {
            base.alerts.high_severity_fraction = other.alerts.high_severity_fraction;
        }
        if other.alerts.reactivate_on_read.is_some() {
            base.alerts.reactivate_on_read = other.alerts.reactivate_on_read;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `REEFWATCH_CATEGORY`, `REEFWATCH_MAX_CORRELATIONS`, etc.
    fn apply_env_overrides(config: &mut ReefwatchConfig) {
        if let Ok(val) = std::env::var("REEFWATCH_CATEGORY") {
            if let Some(category) = TankCategory::parse(&val) {
                config.thresholds.category = Some(category);
            }
        }
        if let Ok(val) = std::env::var("REEFWATCH_MAX_CORRELATIONS") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.max_correlations = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REEFWATCH_INCLUDE_SEASONAL") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.include_seasonal = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REEFWATCH_HIGH_SEVERITY_FRACTION") {
            if let Ok(v) = val.parse::<f64>() {
                config.alerts.high_severity_fraction = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REEFWATCH_REACTIVATE_ON_READ") {
            if let Ok(v) = val.parse::<bool>() {
                config.alerts.reactivate_on_read = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut ReefwatchConfig, o: &ConfigOverrides) {
        if let Some(v) = o.category {
            config.thresholds.category = Some(v);
        }
        if let Some(v) = o.max_correlations {
            config.analysis.max_correlations = Some(v);
        }
        if let Some(v) = o.include_seasonal {
            config.analysis.include_seasonal = Some(v);
        }
        if let Some(v) = o.high_severity_fraction {
            config.alerts.high_severity_fraction = Some(v);
        }
        if let Some(v) = o.reactivate_on_read {
            config.alerts.reactivate_on_read = Some(v);
        }
        if let Some(v) = &o.tracked_parameters {
            config.analysis.tracked_parameters = v.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
