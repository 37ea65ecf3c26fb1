//! Stable error codes for callers forwarding errors across a process boundary.

/// Every error enum implements this to expose a structured code string.
pub trait ReefwatchErrorCode {
    /// Returns the error code string (e.g., "INVALID_TRANSITION").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
pub const ALERT_NOT_FOUND: &str = "ALERT_NOT_FOUND";
pub const INVALID_SNOOZE: &str = "INVALID_SNOOZE";
pub const THRESHOLD_ERROR: &str = "THRESHOLD_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
