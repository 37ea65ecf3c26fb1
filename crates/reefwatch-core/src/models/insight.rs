use serde::{Deserialize, Serialize};

use super::parameter::Parameter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Recommendation,
    Success,
}

/// A human-actionable observation derived from a high-confidence trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub parameter: Parameter,
    pub message: String,
    pub confidence: f64,
    /// How far ahead the observation looks, in days.
    pub horizon_days: u32,
}
