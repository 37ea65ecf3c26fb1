//! Shared constants for the reefwatch engine.

/// reefwatch version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Classification ----

/// Fraction of the ideal span used as one tolerance unit.
pub const TOLERANCE_FRACTION: f64 = 0.2;

/// Distance past the ideal edge, in tolerance units, still classified `acceptable`.
pub const ACCEPTABLE_TOLERANCE_UNITS: f64 = 2.0;

/// Distance past the ideal edge, in tolerance units, still classified `warning`.
pub const WARNING_TOLERANCE_UNITS: f64 = 4.0;

// ---- Trend ----

/// Minimum points for a trend fit.
pub const MIN_TREND_POINTS: usize = 2;

/// Multiplier from the per-day slope to the displayed rate (change per week).
pub const RATE_DISPLAY_FACTOR: f64 = 7.0;

/// Multiplier from |slope per day| to trend confidence.
pub const TREND_CONFIDENCE_GAIN: f64 = 10.0;

/// Trend confidence never exceeds this.
pub const MAX_TREND_CONFIDENCE: f64 = 0.95;

/// Slopes (per day) below this magnitude are `stable`.
pub const STABLE_SLOPE_EPSILON: f64 = 0.001;

/// Per-day slope above which an accumulating parameter is `declining`.
pub const ACCUMULATOR_DECLINE_SLOPE: f64 = 0.5;

// ---- Correlation ----

/// Minimum aligned points for a correlation.
pub const MIN_CORRELATION_POINTS: usize = 10;

/// |r| above this is `strong`.
pub const STRONG_CORRELATION: f64 = 0.7;

/// |r| above this is `moderate`.
pub const MODERATE_CORRELATION: f64 = 0.3;

/// Sums of squared deviations at or below this are treated as zero variance.
pub const ZERO_VARIANCE_EPSILON: f64 = 1e-12;

// ---- Seasonal ----

/// Minimum points in one season bucket to emit a pattern.
pub const MIN_SEASONAL_POINTS: usize = 6;

/// Relative spread of seasonal means that triggers a seasonal insight.
pub const SEASONAL_SPREAD_THRESHOLD: f64 = 0.2;

// ---- Insights ----

/// Trends must exceed this confidence to produce insights.
pub const INSIGHT_CONFIDENCE_THRESHOLD: f64 = 0.7;

// ---- Alerts ----

/// Default fraction of the warning zone past which `warning` maps to `high`.
pub const DEFAULT_HIGH_SEVERITY_FRACTION: f64 = 0.5;

/// Default for lazily reactivating expired snoozes on read.
pub const DEFAULT_REACTIVATE_ON_READ: bool = true;

/// Default for including seasonal patterns in an analysis pass.
pub const DEFAULT_INCLUDE_SEASONAL: bool = true;
