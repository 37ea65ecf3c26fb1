use crate::errors::StorageError;
use crate::models::WaterTest;

/// Ordered measurement history provider.
///
/// Satisfied equally by a fixture, an in-memory fake, or a real store.
/// Implementations return tests sorted ascending by timestamp.
pub trait IMeasurementHistory: Send + Sync {
    fn tests(&self, subject_id: &str) -> Result<Vec<WaterTest>, StorageError>;
}
