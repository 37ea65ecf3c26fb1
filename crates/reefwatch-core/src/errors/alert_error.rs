//! Alert lifecycle errors.

use super::error_code::{self, ReefwatchErrorCode};
use super::storage_error::StorageError;
use crate::models::{AlertAction, AlertStatus};

/// Failures surfaced by the alert lifecycle. These indicate caller logic bugs
/// or collaborator failures, never data conditions.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("cannot {action} alert {alert_id} from status {from}")]
    InvalidTransition {
        alert_id: String,
        from: AlertStatus,
        action: AlertAction,
    },

    #[error("alert not found: {id}")]
    NotFound { id: String },

    #[error("snooze duration must be positive, got {seconds}s")]
    InvalidSnoozeDuration { seconds: i64 },

    #[error("alert repository failure: {0}")]
    Storage(#[from] StorageError),
}

impl ReefwatchErrorCode for AlertError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => error_code::INVALID_TRANSITION,
            Self::NotFound { .. } => error_code::ALERT_NOT_FOUND,
            Self::InvalidSnoozeDuration { .. } => error_code::INVALID_SNOOZE,
            Self::Storage(e) => e.error_code(),
        }
    }
}
