//! In-memory measurement history keyed by subject.

use dashmap::DashMap;
use reefwatch_core::errors::StorageError;
use reefwatch_core::models::WaterTest;
use reefwatch_core::traits::IMeasurementHistory;

/// Append-only per-subject test history held in a [`DashMap`].
///
/// Tests for a subject are kept sorted by timestamp; a test with the same
/// timestamp as an existing one is placed after it.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    tests: DashMap<String, Vec<WaterTest>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from tests for any mix of subjects.
    pub fn from_tests(tests: impl IntoIterator<Item = WaterTest>) -> Self {
        let history = Self::new();
        for test in tests {
            history.append(test);
        }
        history
    }

    /// Append one test in timestamp order.
    pub fn append(&self, test: WaterTest) {
        let mut entry = self.tests.entry(test.subject_id.clone()).or_default();
        let at = entry.partition_point(|t| t.timestamp <= test.timestamp);
        entry.insert(at, test);
    }

    pub fn subject_count(&self) -> usize {
        self.tests.len()
    }

    pub fn test_count(&self, subject_id: &str) -> usize {
        self.tests.get(subject_id).map_or(0, |t| t.len())
    }
}

impl IMeasurementHistory for InMemoryHistory {
    fn tests(&self, subject_id: &str) -> Result<Vec<WaterTest>, StorageError> {
        Ok(self
            .tests
            .get(subject_id)
            .map(|t| t.value().clone())
            .unwrap_or_default())
    }
}
