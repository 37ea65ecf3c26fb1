//! Maps one measured value plus a threshold band to a classification.
//!
//! A tolerance unit `t` sets the zone widths past the nearest ideal edge:
//! up to `2t` is `acceptable`, up to `4t` is `warning`, beyond is `critical`.
//!
//! - Two-sided ideal range: `t = 0.2 × (ideal_max − ideal_min)`. A degenerate
//!   range (`ideal_min == ideal_max`) gives `t = 0`, so any deviation is critical.
//! - One-sided ideal bound: `t` is derived from the next bound on the breached
//!   side so that the acceptable zone ends at the warning bound, or, with no
//!   warning bound, the warning zone ends at the critical bound. With neither,
//!   `t = 0`.
//! - No ideal bound at all: unclassifiable, reported as `acceptable`.

use reefwatch_core::constants::{
    ACCEPTABLE_TOLERANCE_UNITS, TOLERANCE_FRACTION, WARNING_TOLERANCE_UNITS,
};
use reefwatch_core::models::{Classification, Measurement, ThresholdBand, ThresholdProfile, WaterTest};
use serde::{Deserialize, Serialize};

/// Where a value sits relative to its ideal band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breach {
    pub classification: Classification,
    /// Distance past the nearest ideal edge (0 when ideal).
    pub distance: f64,
    /// One tolerance unit for the breached side.
    pub tolerance: f64,
}

impl Breach {
    fn ideal() -> Self {
        Self {
            classification: Classification::Ideal,
            distance: 0.0,
            tolerance: 0.0,
        }
    }

    /// Distance past the acceptable zone where the acceptable zone ends.
    pub fn acceptable_width(&self) -> f64 {
        self.tolerance * ACCEPTABLE_TOLERANCE_UNITS
    }

    /// Distance past the ideal edge where the warning zone ends.
    pub fn warning_width(&self) -> f64 {
        self.tolerance * WARNING_TOLERANCE_UNITS
    }

    /// How deep into the warning zone the value sits, in `[0, 1]`.
    /// `None` unless the classification is `warning`.
    pub fn warning_depth(&self) -> Option<f64> {
        if self.classification != Classification::Warning {
            return None;
        }
        let zone = self.warning_width() - self.acceptable_width();
        if zone <= 0.0 {
            return None;
        }
        Some(((self.distance - self.acceptable_width()) / zone).clamp(0.0, 1.0))
    }
}

/// Classify `value` against `band`.
pub fn classify(value: f64, band: &ThresholdBand) -> Classification {
    assess(value, band)
        .map(|b| b.classification)
        .unwrap_or(Classification::Acceptable)
}

/// Full assessment, or `None` when the band has no ideal bound or the
/// value is not finite.
pub fn assess(value: f64, band: &ThresholdBand) -> Option<Breach> {
    if !value.is_finite() {
        return None;
    }

    let (distance, tolerance) = match (band.ideal_min, band.ideal_max) {
        (Some(lo), Some(hi)) => {
            if (lo..=hi).contains(&value) {
                return Some(Breach::ideal());
            }
            let distance = if value < lo { lo - value } else { value - hi };
            (distance, (hi - lo) * TOLERANCE_FRACTION)
        }
        (None, Some(hi)) => {
            if value <= hi {
                return Some(Breach::ideal());
            }
            (
                value - hi,
                one_sided_tolerance(hi, band.warning_max, band.critical_max),
            )
        }
        (Some(lo), None) => {
            if value >= lo {
                return Some(Breach::ideal());
            }
            (
                lo - value,
                one_sided_tolerance(lo, band.warning_min, band.critical_min),
            )
        }
        (None, None) => return None,
    };

    let classification = if distance <= tolerance * ACCEPTABLE_TOLERANCE_UNITS {
        Classification::Acceptable
    } else if distance <= tolerance * WARNING_TOLERANCE_UNITS {
        Classification::Warning
    } else {
        Classification::Critical
    };

    Some(Breach {
        classification,
        distance,
        tolerance,
    })
}

fn one_sided_tolerance(ideal: f64, warning: Option<f64>, critical: Option<f64>) -> f64 {
    match (warning, critical) {
        (Some(w), _) => (w - ideal).abs() / ACCEPTABLE_TOLERANCE_UNITS,
        (None, Some(c)) => (c - ideal).abs() / WARNING_TOLERANCE_UNITS,
        (None, None) => 0.0,
    }
}

/// A measurement paired with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedMeasurement {
    pub measurement: Measurement,
    pub classification: Classification,
}

/// Classify a measurement using the profile's band for its parameter.
/// Parameters without a band are `acceptable`.
pub fn classify_measurement(measurement: &Measurement, profile: &ThresholdProfile) -> Classification {
    profile
        .band(&measurement.parameter)
        .map(|band| classify(measurement.value, band))
        .unwrap_or(Classification::Acceptable)
}

/// Classify every measurement in one test.
pub fn classify_test(test: &WaterTest, profile: &ThresholdProfile) -> Vec<ClassifiedMeasurement> {
    test.measurements
        .iter()
        .map(|m| ClassifiedMeasurement {
            measurement: m.clone(),
            classification: classify_measurement(m, profile),
        })
        .collect()
}
