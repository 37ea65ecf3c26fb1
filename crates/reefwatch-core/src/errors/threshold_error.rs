//! Threshold band validation errors.

use super::error_code::{self, ReefwatchErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ThresholdError {
    #[error("{parameter}: {lower} must not exceed {upper}")]
    BoundsOutOfOrder {
        parameter: String,
        lower: String,
        upper: String,
    },

    #[error("{parameter}: {field} must be finite")]
    NonFinite { parameter: String, field: String },
}

impl ReefwatchErrorCode for ThresholdError {
    fn error_code(&self) -> &'static str {
        error_code::THRESHOLD_ERROR
    }
}
