//! Alert lifecycle configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlertConfig {
    /// Fraction of the warning zone past which `warning` maps to `high`. Default: 0.5.
    pub high_severity_fraction: Option<f64>,
    /// Reactivate expired snoozes when alerts are listed. Default: true.
    pub reactivate_on_read: Option<bool>,
}

impl AlertConfig {
    pub fn effective_high_severity_fraction(&self) -> f64 {
        self.high_severity_fraction
            .unwrap_or(constants::DEFAULT_HIGH_SEVERITY_FRACTION)
    }

    pub fn effective_reactivate_on_read(&self) -> bool {
        self.reactivate_on_read
            .unwrap_or(constants::DEFAULT_REACTIVATE_ON_READ)
    }
}
