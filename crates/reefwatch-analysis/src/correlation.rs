//! Pearson correlation between parameter histories.

use reefwatch_core::constants::{MIN_CORRELATION_POINTS, MODERATE_CORRELATION, STRONG_CORRELATION};
use reefwatch_core::models::{
    CorrelationDirection, CorrelationResult, CorrelationStrength, Parameter, WaterTest,
};

use crate::series;
use crate::stats;

/// Correlate two value series positionally over the first `min(len)` points.
///
/// `None` below ten points or when either series has zero variance.
pub fn correlate(
    parameter_a: &Parameter,
    series_a: &[f64],
    parameter_b: &Parameter,
    series_b: &[f64],
) -> Option<CorrelationResult> {
    let n = series_a.len().min(series_b.len());
    if n < MIN_CORRELATION_POINTS {
        return None;
    }
    let coefficient = stats::pearson(&series_a[..n], &series_b[..n])?;

    Some(CorrelationResult {
        parameter_a: parameter_a.clone(),
        parameter_b: parameter_b.clone(),
        coefficient,
        strength: strength_for(coefficient),
        direction: if coefficient < 0.0 {
            CorrelationDirection::Negative
        } else {
            CorrelationDirection::Positive
        },
        sample_count: n,
    })
}

pub fn strength_for(coefficient: f64) -> CorrelationStrength {
    let magnitude = coefficient.abs();
    if magnitude > STRONG_CORRELATION {
        CorrelationStrength::Strong
    } else if magnitude > MODERATE_CORRELATION {
        CorrelationStrength::Moderate
    } else {
        CorrelationStrength::Weak
    }
}

/// Correlate every unordered pair of `parameters` across `tests`.
///
/// Values are paired by test, so only tests recording both parameters of a
/// pair contribute. Results are sorted by descending |coefficient|; pairs
/// with too few shared tests or zero variance are left out.
pub fn correlate_history(tests: &[WaterTest], parameters: &[Parameter]) -> Vec<CorrelationResult> {
    let mut results = Vec::new();
    for (i, a) in parameters.iter().enumerate() {
        for b in &parameters[i + 1..] {
            let (values_a, values_b) = series::aligned_values(tests, a, b);
            if let Some(result) = correlate(a, &values_a, b, &values_b) {
                results.push(result);
            }
        }
    }

    results.sort_by(|x, y| {
        y.coefficient
            .abs()
            .total_cmp(&x.coefficient.abs())
            .then_with(|| x.parameter_a.cmp(&y.parameter_a))
            .then_with(|| x.parameter_b.cmp(&y.parameter_b))
    });
    results
}
