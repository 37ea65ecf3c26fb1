//! Threshold configuration: category defaults plus per-parameter overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ThresholdError;
use crate::models::{Parameter, TankCategory, ThresholdBand, ThresholdProfile};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Category whose default bands apply. Default: freshwater.
    pub category: Option<TankCategory>,
    /// Bands replacing the category default, keyed by parameter name.
    #[serde(default)]
    pub overrides: BTreeMap<String, ThresholdBand>,
}

impl ThresholdConfig {
    pub fn effective_category(&self) -> TankCategory {
        self.category.unwrap_or_default()
    }

    /// Resolve the category defaults with every override applied and validated.
    pub fn resolve(&self) -> Result<ThresholdProfile, ThresholdError> {
        self.overrides.iter().try_fold(
            ThresholdProfile::for_category(self.effective_category()),
            |profile, (name, band)| profile.with_override(Parameter::parse(name), band.clone()),
        )
    }
}
