//! Turns high-confidence trends (and optionally seasonal patterns) into
//! actionable insights. A trend or parameter with no matching rule yields
//! nothing.

pub mod rules;

use std::collections::BTreeMap;

use reefwatch_core::constants::{
    INSIGHT_CONFIDENCE_THRESHOLD, MAX_TREND_CONFIDENCE, SEASONAL_SPREAD_THRESHOLD,
};
use reefwatch_core::models::{Insight, InsightKind, Parameter, SeasonalPattern, TrendResult};

/// Horizon for seasonal recommendations, in days.
const SEASONAL_HORIZON_DAYS: u32 = 90;

/// Apply the rule table to every trend whose confidence exceeds 0.7.
pub fn generate_insights(trends: &[TrendResult]) -> Vec<Insight> {
    trends
        .iter()
        .filter(|t| t.confidence > INSIGHT_CONFIDENCE_THRESHOLD)
        .filter_map(|t| {
            let rule = rules::find(t.parameter.as_str(), t.direction)?;
            if t.rate.abs() <= rule.min_rate {
                return None;
            }
            Some(Insight {
                kind: rule.kind,
                parameter: t.parameter.clone(),
                message: render(rule.template, &t.parameter, t.rate),
                confidence: t.confidence,
                horizon_days: rule.horizon_days,
            })
        })
        .collect()
}

/// Trend insights plus a recommendation for each parameter whose seasonal
/// means spread by at least 20% of their overall mean.
pub fn generate_insights_with_seasonal(
    trends: &[TrendResult],
    patterns: &[SeasonalPattern],
) -> Vec<Insight> {
    let mut insights = generate_insights(trends);
    insights.extend(seasonal_insights(patterns));
    insights
}

fn seasonal_insights(patterns: &[SeasonalPattern]) -> Vec<Insight> {
    let mut by_parameter: BTreeMap<&Parameter, Vec<&SeasonalPattern>> = BTreeMap::new();
    for p in patterns {
        by_parameter.entry(&p.parameter).or_default().push(p);
    }

    by_parameter
        .into_iter()
        .filter(|(_, seasons)| seasons.len() >= 2)
        .filter_map(|(parameter, seasons)| {
            let overall =
                seasons.iter().map(|p| p.average_value).sum::<f64>() / seasons.len() as f64;
            if overall.abs() <= f64::EPSILON {
                return None;
            }
            let high = seasons
                .iter()
                .max_by(|a, b| a.average_value.total_cmp(&b.average_value))?;
            let low = seasons
                .iter()
                .min_by(|a, b| a.average_value.total_cmp(&b.average_value))?;

            let spread = (high.average_value - low.average_value) / overall.abs();
            if spread < SEASONAL_SPREAD_THRESHOLD {
                return None;
            }
            let confidence = (INSIGHT_CONFIDENCE_THRESHOLD + spread / 2.0).min(MAX_TREND_CONFIDENCE);
            let unit = unit_of(parameter);

            Some(Insight {
                kind: InsightKind::Recommendation,
                parameter: parameter.clone(),
                message: format!(
                    "{} averages {:.2}{} in {} versus {:.2}{} in {}; plan maintenance ahead of {}.",
                    parameter.display_name(),
                    high.average_value,
                    unit,
                    high.season,
                    low.average_value,
                    unit,
                    low.season,
                    high.season,
                ),
                confidence,
                horizon_days: SEASONAL_HORIZON_DAYS,
            })
        })
        .collect()
}

fn unit_of(parameter: &Parameter) -> String {
    match parameter.profile() {
        Some(profile) if profile.unit != "pH" => format!(" {}", profile.unit),
        _ => String::new(),
    }
}

fn render(template: &str, parameter: &Parameter, rate: f64) -> String {
    template.replace("{rate}", &format!("{:.2}{}", rate.abs(), unit_of(parameter)))
}
