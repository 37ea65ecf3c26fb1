//! In-memory alert repository.

use dashmap::DashMap;
use reefwatch_core::errors::StorageError;
use reefwatch_core::models::{Alert, AlertQuery};
use reefwatch_core::traits::IAlertRepository;

/// Alerts keyed by id in a [`DashMap`]. Nothing is ever removed.
#[derive(Debug, Default)]
pub struct InMemoryAlertRepository {
    alerts: DashMap<String, Alert>,
}

impl InMemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

impl IAlertRepository for InMemoryAlertRepository {
    fn get(&self, id: &str) -> Result<Option<Alert>, StorageError> {
        Ok(self.alerts.get(id).map(|a| a.value().clone()))
    }

    fn put(&self, alert: &Alert) -> Result<(), StorageError> {
        self.alerts.insert(alert.id.clone(), alert.clone());
        Ok(())
    }

    fn list(&self, query: &AlertQuery) -> Result<Vec<Alert>, StorageError> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .iter()
            .filter(|a| query.matches(a.value()))
            .map(|a| a.value().clone())
            .collect();
        alerts.sort_by(|a, b| a.triggered_at.cmp(&b.triggered_at).then_with(|| a.id.cmp(&b.id)));
        Ok(alerts)
    }
}
