//! Declarative insight rules keyed by parameter and trend direction.

use reefwatch_core::models::{InsightKind, TrendDirection};

/// One row of the rule table. `{rate}` in the template is replaced with
/// the absolute weekly rate and unit.
#[derive(Debug, Clone, Copy)]
pub struct InsightRule {
    pub parameter: &'static str,
    pub direction: TrendDirection,
    /// |rate| must exceed this for the rule to fire.
    pub min_rate: f64,
    pub kind: InsightKind,
    pub horizon_days: u32,
    pub template: &'static str,
}

pub const RULES: &[InsightRule] = &[
    InsightRule {
        parameter: "ammonia",
        direction: TrendDirection::Declining,
        min_rate: 0.1,
        kind: InsightKind::Warning,
        horizon_days: 7,
        template: "Ammonia is rising by {rate} per week; toxic levels are likely within 7 days. Test daily and prepare a water change.",
    },
    InsightRule {
        parameter: "nitrite",
        direction: TrendDirection::Declining,
        min_rate: 0.1,
        kind: InsightKind::Warning,
        horizon_days: 7,
        template: "Nitrite is rising by {rate} per week; the biological filter may be struggling. Reduce feeding and test daily.",
    },
    InsightRule {
        parameter: "nitrate",
        direction: TrendDirection::Declining,
        min_rate: 3.5,
        kind: InsightKind::Recommendation,
        horizon_days: 14,
        template: "Nitrate is accumulating by {rate} per week; schedule a partial water change within 14 days.",
    },
    InsightRule {
        parameter: "phosphate",
        direction: TrendDirection::Declining,
        min_rate: 0.5,
        kind: InsightKind::Recommendation,
        horizon_days: 14,
        template: "Phosphate is rising by {rate} per week; review feeding and consider phosphate-removing media.",
    },
    InsightRule {
        parameter: "ph",
        direction: TrendDirection::Improving,
        min_rate: 0.0,
        kind: InsightKind::Success,
        horizon_days: 30,
        template: "pH is settling toward its ideal range; keep the current maintenance routine.",
    },
    InsightRule {
        parameter: "ph",
        direction: TrendDirection::Declining,
        min_rate: 0.0,
        kind: InsightKind::Recommendation,
        horizon_days: 14,
        template: "pH is drifting away from its ideal range by {rate} per week; check buffering capacity.",
    },
    InsightRule {
        parameter: "temperature",
        direction: TrendDirection::Declining,
        min_rate: 0.0,
        kind: InsightKind::Warning,
        horizon_days: 3,
        template: "Temperature is drifting away from its ideal range by {rate} per week; check the heater and room temperature.",
    },
    InsightRule {
        parameter: "alkalinity",
        direction: TrendDirection::Declining,
        min_rate: 0.0,
        kind: InsightKind::Recommendation,
        horizon_days: 14,
        template: "Alkalinity is drifting away from its ideal range by {rate} per week; adjust buffer dosing.",
    },
    InsightRule {
        parameter: "ammonia",
        direction: TrendDirection::Improving,
        min_rate: 0.0,
        kind: InsightKind::Success,
        horizon_days: 30,
        template: "Ammonia is falling by {rate} per week; the biological filter is keeping up.",
    },
    InsightRule {
        parameter: "nitrite",
        direction: TrendDirection::Improving,
        min_rate: 0.0,
        kind: InsightKind::Success,
        horizon_days: 30,
        template: "Nitrite is falling by {rate} per week; the nitrogen cycle is progressing.",
    },
];

/// First rule matching `parameter` and `direction`.
pub fn find(parameter: &str, direction: TrendDirection) -> Option<&'static InsightRule> {
    RULES
        .iter()
        .find(|r| r.parameter == parameter && r.direction == direction)
}
