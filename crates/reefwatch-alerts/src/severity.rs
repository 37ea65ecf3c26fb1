//! Classification → alert severity.

use reefwatch_analysis::Breach;
use reefwatch_core::models::{AlertSeverity, Classification};

/// Severity for a breach, or `None` when the classification does not alert.
///
/// `critical` maps to `critical`. `warning` maps to `high` once the value is
/// at least `high_fraction` of the way through the warning zone, else `medium`.
pub fn severity_for(breach: &Breach, high_fraction: f64) -> Option<AlertSeverity> {
    match breach.classification {
        Classification::Critical => Some(AlertSeverity::Critical),
        Classification::Warning => {
            let depth = breach.warning_depth().unwrap_or(0.0);
            if depth >= high_fraction {
                Some(AlertSeverity::High)
            } else {
                Some(AlertSeverity::Medium)
            }
        }
        Classification::Ideal | Classification::Acceptable => None,
    }
}
