use serde::{Deserialize, Serialize};

use super::parameter::Parameter;

/// Direction of a parameter's change, judged by the parameter's semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

/// Result of a least-squares fit over one parameter's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub parameter: Parameter,
    pub direction: TrendDirection,
    /// Fitted slope rescaled for display (change per week).
    pub rate: f64,
    /// Heuristic confidence in `[0, 0.95]`.
    pub confidence: f64,
    /// Points the fit was computed over.
    pub sample_count: usize,
}
