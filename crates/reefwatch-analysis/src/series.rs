//! Helpers for slicing a test history into per-parameter series.

use std::collections::BTreeSet;

use reefwatch_core::models::{Measurement, Parameter, WaterTest};

/// Every parameter recorded anywhere in `tests`, in catalogue order.
pub fn parameters_in(tests: &[WaterTest]) -> Vec<Parameter> {
    tests
        .iter()
        .flat_map(|t| t.measurements.iter().map(|m| m.parameter.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Chronological measurements of one parameter across `tests`.
pub fn series_for(tests: &[WaterTest], parameter: &Parameter) -> Vec<Measurement> {
    tests
        .iter()
        .filter_map(|t| t.measurement(parameter).cloned())
        .collect()
}

/// Values of two parameters from the tests that recorded both.
pub fn aligned_values(tests: &[WaterTest], a: &Parameter, b: &Parameter) -> (Vec<f64>, Vec<f64>) {
    tests
        .iter()
        .filter_map(|t| Some((t.value(a)?, t.value(b)?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .unzip()
}

/// Whether `tests` are in ascending timestamp order.
pub fn is_chronological(tests: &[WaterTest]) -> bool {
    tests.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}
