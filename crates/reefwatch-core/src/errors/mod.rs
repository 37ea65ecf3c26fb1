//! Error handling for reefwatch.
//! One error enum per concern, `thiserror` only.
//!
//! Sparse or missing history is never an error: analysis returns `None` or
//! an empty collection for it. Only alert transitions, band validation,
//! configuration, and collaborator I/O fail.

pub mod alert_error;
pub mod config_error;
pub mod error_code;
pub mod storage_error;
pub mod threshold_error;

pub use alert_error::AlertError;
pub use config_error::ConfigError;
pub use error_code::ReefwatchErrorCode;
pub use storage_error::StorageError;
pub use threshold_error::ThresholdError;

/// Aggregate error for callers that drive several subsystems.
#[derive(Debug, thiserror::Error)]
pub enum ReefwatchError {
    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),

    #[error("Threshold error: {0}")]
    Threshold(#[from] ThresholdError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ReefwatchErrorCode for ReefwatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Alert(e) => e.error_code(),
            Self::Threshold(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}

pub type ReefwatchResult<T> = Result<T, ReefwatchError>;
