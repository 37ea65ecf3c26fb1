//! Per-season mean and variance of each parameter.

use std::collections::BTreeMap;

use chrono::Datelike;
use reefwatch_core::constants::MIN_SEASONAL_POINTS;
use reefwatch_core::models::{Measurement, Parameter, Season, SeasonalPattern};

use crate::stats;

/// Bucket measurements by (parameter, season) and summarize each bucket
/// holding at least six points. Output is ordered by parameter, then season.
pub fn aggregate_by_season(series: &[Measurement]) -> Vec<SeasonalPattern> {
    let mut buckets: BTreeMap<(Parameter, Season), Vec<f64>> = BTreeMap::new();
    for m in series.iter().filter(|m| m.value.is_finite()) {
        let season = Season::from_month0(m.timestamp.month0());
        buckets
            .entry((m.parameter.clone(), season))
            .or_default()
            .push(m.value);
    }

    buckets
        .into_iter()
        .filter(|(_, values)| values.len() >= MIN_SEASONAL_POINTS)
        .filter_map(|((parameter, season), values)| {
            Some(SeasonalPattern {
                parameter,
                season,
                average_value: stats::mean(&values)?,
                variance: stats::population_variance(&values)?,
                sample_count: values.len(),
            })
        })
        .collect()
}
