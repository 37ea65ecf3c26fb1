//! Least-squares trend over one parameter's chronological series.
//!
//! Direction is judged through the parameter catalogue's [`BetterDirection`]
//! rather than the raw slope sign.

use reefwatch_core::constants::{
    ACCUMULATOR_DECLINE_SLOPE, MAX_TREND_CONFIDENCE, MIN_TREND_POINTS, RATE_DISPLAY_FACTOR,
    STABLE_SLOPE_EPSILON, TREND_CONFIDENCE_GAIN,
};
use reefwatch_core::models::{
    BetterDirection, Measurement, Parameter, ThresholdBand, TrendDirection, TrendResult,
};

use crate::stats;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Trend without band context. Target-midpoint parameters fall back to
/// `improving` for any non-negligible slope.
pub fn analyze_trend(series: &[Measurement]) -> Option<TrendResult> {
    analyze_trend_with_band(series, None)
}

/// Trend with the parameter's band, used to judge drift toward or away
/// from the ideal midpoint.
///
/// The series parameter is taken from the first point; points of any other
/// parameter and non-finite values are skipped. Returns `None` with fewer
/// than two usable points or when every point shares one timestamp.
pub fn analyze_trend_with_band(
    series: &[Measurement],
    band: Option<&ThresholdBand>,
) -> Option<TrendResult> {
    let first = series.first()?;
    let parameter = &first.parameter;
    let origin = first.timestamp;

    let points: Vec<&Measurement> = series
        .iter()
        .filter(|m| &m.parameter == parameter && m.value.is_finite())
        .collect();
    if points.len() < MIN_TREND_POINTS {
        return None;
    }

    let xs: Vec<f64> = points
        .iter()
        .map(|m| (m.timestamp - origin).num_seconds() as f64 / SECONDS_PER_DAY)
        .collect();
    let ys: Vec<f64> = points.iter().map(|m| m.value).collect();

    let slope = stats::least_squares_slope(&xs, &ys)?;
    let latest = *ys.last()?;

    Some(TrendResult {
        parameter: parameter.clone(),
        direction: direction_for(parameter, slope, latest, band),
        rate: slope * RATE_DISPLAY_FACTOR,
        confidence: confidence_for(slope),
        sample_count: points.len(),
    })
}

/// `min(|slope| × gain, 0.95)`. A heuristic, never a certainty.
pub fn confidence_for(slope_per_day: f64) -> f64 {
    (slope_per_day.abs() * TREND_CONFIDENCE_GAIN).clamp(0.0, MAX_TREND_CONFIDENCE)
}

/// Map a per-day slope to a direction using the parameter's semantics.
pub fn direction_for(
    parameter: &Parameter,
    slope_per_day: f64,
    latest: f64,
    band: Option<&ThresholdBand>,
) -> TrendDirection {
    if slope_per_day.abs() < STABLE_SLOPE_EPSILON {
        return TrendDirection::Stable;
    }

    match parameter.better_direction() {
        Some(BetterDirection::Lower) => {
            if slope_per_day < 0.0 {
                TrendDirection::Improving
            } else {
                TrendDirection::Declining
            }
        }
        Some(BetterDirection::Higher) => {
            if slope_per_day > 0.0 {
                TrendDirection::Improving
            } else {
                TrendDirection::Declining
            }
        }
        Some(BetterDirection::Accumulator) => {
            if slope_per_day < 0.0 {
                TrendDirection::Improving
            } else if slope_per_day > ACCUMULATOR_DECLINE_SLOPE {
                TrendDirection::Declining
            } else {
                TrendDirection::Stable
            }
        }
        Some(BetterDirection::TargetMidpoint) => match band.and_then(ThresholdBand::ideal_midpoint) {
            Some(midpoint) => {
                let toward = (latest < midpoint && slope_per_day > 0.0)
                    || (latest > midpoint && slope_per_day < 0.0);
                if toward {
                    TrendDirection::Improving
                } else {
                    TrendDirection::Declining
                }
            }
            None => TrendDirection::Improving,
        },
        // Uncatalogued parameters: conservative fallback.
        None => TrendDirection::Improving,
    }
}
