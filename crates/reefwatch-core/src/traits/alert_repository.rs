use crate::errors::StorageError;
use crate::models::{Alert, AlertQuery};

/// Alert storage injected into the lifecycle manager.
///
/// `put` is an upsert keyed by alert id. Alerts are never deleted.
pub trait IAlertRepository: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<Alert>, StorageError>;
    fn put(&self, alert: &Alert) -> Result<(), StorageError>;
    /// Alerts matching `query`, ordered by `triggered_at` ascending.
    fn list(&self, query: &AlertQuery) -> Result<Vec<Alert>, StorageError>;
}
