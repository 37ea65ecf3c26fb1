//! Errors from injected collaborators (history providers, alert repositories).

use super::error_code::{self, ReefwatchErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("record rejected by store: {reason}")]
    Rejected { reason: String },

    #[error("stored data is corrupt: {details}")]
    Corrupt { details: String },
}

impl ReefwatchErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
