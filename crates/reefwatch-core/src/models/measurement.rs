use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::parameter::Parameter;

/// One recorded value for one parameter at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub parameter: Parameter,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

impl Measurement {
    /// Build a measurement using the catalogue unit (empty for unknown parameters).
    pub fn new(parameter: Parameter, value: f64, timestamp: DateTime<Utc>) -> Self {
        let unit = parameter.profile().map(|p| p.unit).unwrap_or("").to_string();
        Self {
            parameter,
            value,
            unit,
            timestamp,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

/// An immutable, timestamped set of measurements for one subject (aquarium).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterTest {
    pub id: String,
    pub subject_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl WaterTest {
    pub fn new(
        id: impl Into<String>,
        subject_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        measurements: Vec<Measurement>,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            timestamp,
            measurements,
        }
    }

    /// First measurement of `parameter` in this test, if recorded.
    pub fn measurement(&self, parameter: &Parameter) -> Option<&Measurement> {
        self.measurements.iter().find(|m| &m.parameter == parameter)
    }

    /// Value of `parameter` in this test, if recorded.
    pub fn value(&self, parameter: &Parameter) -> Option<f64> {
        self.measurement(parameter).map(|m| m.value)
    }
}
