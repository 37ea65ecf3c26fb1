//! Threshold bands and per-category default profiles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::parameter::Parameter;
use crate::errors::ThresholdError;

/// Ideal/warning/critical bounds for one parameter.
///
/// Each bound is independently optional. When present they must satisfy
/// `critical_min ≤ warning_min ≤ ideal_min ≤ ideal_max ≤ warning_max ≤ critical_max`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdBand {
    pub ideal_min: Option<f64>,
    pub ideal_max: Option<f64>,
    pub warning_min: Option<f64>,
    pub warning_max: Option<f64>,
    pub critical_min: Option<f64>,
    pub critical_max: Option<f64>,
    pub unit: String,
}

impl ThresholdBand {
    /// Two-sided ideal range.
    pub fn ideal(min: f64, max: f64) -> Self {
        Self {
            ideal_min: Some(min),
            ideal_max: Some(max),
            ..Self::default()
        }
    }

    /// Full two-sided band.
    pub fn two_sided(ideal: (f64, f64), warning: (f64, f64), critical: (f64, f64)) -> Self {
        Self {
            ideal_min: Some(ideal.0),
            ideal_max: Some(ideal.1),
            warning_min: Some(warning.0),
            warning_max: Some(warning.1),
            critical_min: Some(critical.0),
            critical_max: Some(critical.1),
            unit: String::new(),
        }
    }

    /// Upper-bound-only band, for compounds where less is better.
    pub fn upper(ideal_max: f64, warning_max: f64, critical_max: f64) -> Self {
        Self {
            ideal_max: Some(ideal_max),
            warning_max: Some(warning_max),
            critical_max: Some(critical_max),
            ..Self::default()
        }
    }

    /// Lower-bound-only band, for quantities where more is better.
    pub fn lower(ideal_min: f64, warning_min: f64, critical_min: f64) -> Self {
        Self {
            ideal_min: Some(ideal_min),
            warning_min: Some(warning_min),
            critical_min: Some(critical_min),
            ..Self::default()
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Midpoint of a two-sided ideal range.
    pub fn ideal_midpoint(&self) -> Option<f64> {
        match (self.ideal_min, self.ideal_max) {
            (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
            _ => None,
        }
    }

    /// Check the ordering invariant over the bounds that are present.
    pub fn validate(&self, parameter: &Parameter) -> Result<(), ThresholdError> {
        let chain = [
            ("critical_min", self.critical_min),
            ("warning_min", self.warning_min),
            ("ideal_min", self.ideal_min),
            ("ideal_max", self.ideal_max),
            ("warning_max", self.warning_max),
            ("critical_max", self.critical_max),
        ];

        let mut previous: Option<(&'static str, f64)> = None;
        for (field, bound) in chain {
            let Some(value) = bound else { continue };
            if !value.is_finite() {
                return Err(ThresholdError::NonFinite {
                    parameter: parameter.to_string(),
                    field: field.to_string(),
                });
            }
            if let Some((prev_field, prev_value)) = previous {
                if prev_value > value {
                    return Err(ThresholdError::BoundsOutOfOrder {
                        parameter: parameter.to_string(),
                        lower: prev_field.to_string(),
                        upper: field.to_string(),
                    });
                }
            }
            previous = Some((field, value));
        }
        Ok(())
    }
}

/// Aquarium category used to select default bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankCategory {
    #[default]
    Freshwater,
    Saltwater,
}

impl TankCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Freshwater => "freshwater",
            Self::Saltwater => "saltwater",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freshwater" | "fresh" => Some(Self::Freshwater),
            "saltwater" | "marine" | "reef" | "salt" => Some(Self::Saltwater),
            _ => None,
        }
    }
}

impl fmt::Display for TankCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from parameter to its band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    bands: BTreeMap<Parameter, ThresholdBand>,
}

impl ThresholdProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default bands for a tank category.
    pub fn for_category(category: TankCategory) -> Self {
        match category {
            TankCategory::Freshwater => Self::freshwater(),
            TankCategory::Saltwater => Self::saltwater(),
        }
    }

    fn freshwater() -> Self {
        let mut profile = Self::new();
        profile.set(Parameter::Ph, ThresholdBand::two_sided((6.8, 7.6), (6.5, 8.0), (6.0, 8.5)));
        profile.set(Parameter::Temperature, ThresholdBand::two_sided((24.0, 27.0), (22.0, 29.0), (20.0, 31.0)));
        profile.set(Parameter::Ammonia, ThresholdBand::upper(0.0, 0.25, 1.0));
        profile.set(Parameter::Nitrite, ThresholdBand::upper(0.0, 0.25, 1.0));
        profile.set(Parameter::Nitrate, ThresholdBand::upper(20.0, 40.0, 80.0));
        profile.set(Parameter::Phosphate, ThresholdBand::upper(0.5, 1.0, 2.0));
        profile.set(Parameter::Alkalinity, ThresholdBand::two_sided((3.0, 8.0), (2.0, 10.0), (1.0, 12.0)));
        profile.set(Parameter::GeneralHardness, ThresholdBand::two_sided((4.0, 12.0), (3.0, 16.0), (2.0, 20.0)));
        profile.set(Parameter::DissolvedOxygen, ThresholdBand::lower(6.0, 5.0, 4.0));
        profile
    }

    fn saltwater() -> Self {
        let mut profile = Self::new();
        profile.set(Parameter::Ph, ThresholdBand::two_sided((8.1, 8.4), (7.9, 8.6), (7.6, 8.8)));
        profile.set(Parameter::Temperature, ThresholdBand::two_sided((24.0, 26.5), (23.0, 28.0), (21.0, 30.0)));
        profile.set(Parameter::Salinity, ThresholdBand::two_sided((1.023, 1.026), (1.020, 1.028), (1.018, 1.030)));
        profile.set(Parameter::Ammonia, ThresholdBand::upper(0.0, 0.1, 0.5));
        profile.set(Parameter::Nitrite, ThresholdBand::upper(0.0, 0.1, 0.5));
        profile.set(Parameter::Nitrate, ThresholdBand::upper(10.0, 25.0, 50.0));
        profile.set(Parameter::Phosphate, ThresholdBand::upper(0.03, 0.1, 0.5));
        profile.set(Parameter::Alkalinity, ThresholdBand::two_sided((8.0, 11.0), (7.0, 12.0), (6.0, 14.0)));
        profile.set(Parameter::Calcium, ThresholdBand::two_sided((400.0, 450.0), (380.0, 480.0), (350.0, 500.0)));
        profile.set(Parameter::Magnesium, ThresholdBand::two_sided((1250.0, 1350.0), (1200.0, 1450.0), (1100.0, 1500.0)));
        profile.set(Parameter::DissolvedOxygen, ThresholdBand::lower(6.0, 5.0, 4.0));
        profile
    }

    /// Insert a band, filling its unit from the catalogue when empty.
    fn set(&mut self, parameter: Parameter, mut band: ThresholdBand) {
        if band.unit.is_empty() {
            if let Some(profile) = parameter.profile() {
                band.unit = profile.unit.to_string();
            }
        }
        self.bands.insert(parameter, band);
    }

    /// Replace the band for `parameter` after validating it.
    pub fn with_override(
        mut self,
        parameter: Parameter,
        band: ThresholdBand,
    ) -> Result<Self, ThresholdError> {
        band.validate(&parameter)?;
        self.set(parameter, band);
        Ok(self)
    }

    pub fn band(&self, parameter: &Parameter) -> Option<&ThresholdBand> {
        self.bands.get(parameter)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.bands.keys()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Validate every band in the profile.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        self.bands
            .iter()
            .try_for_each(|(parameter, band)| band.validate(parameter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profiles_satisfy_ordering() {
        ThresholdProfile::for_category(TankCategory::Freshwater).validate().unwrap();
        ThresholdProfile::for_category(TankCategory::Saltwater).validate().unwrap();
    }

    #[test]
    fn out_of_order_bounds_are_rejected() {
        let band = ThresholdBand {
            ideal_min: Some(7.0),
            ideal_max: Some(6.0),
            ..ThresholdBand::default()
        };
        let err = band.validate(&Parameter::Ph).unwrap_err();
        assert!(err.to_string().contains("ideal_min"));
    }

    #[test]
    fn one_sided_band_is_valid() {
        ThresholdBand::upper(0.0, 0.25, 1.0).validate(&Parameter::Ammonia).unwrap();
    }
}
