//! Event payload types for alert lifecycle transitions.

use chrono::{DateTime, Utc};

use crate::models::{Alert, AlertSeverity, AlertStatus, Classification};

/// Payload for `on_alert_created`.
#[derive(Debug, Clone)]
pub struct AlertCreatedEvent {
    pub alert: Alert,
    pub classification: Classification,
}

/// Payload for `on_alert_escalated`: a worse breach hit an open alert.
#[derive(Debug, Clone)]
pub struct AlertEscalatedEvent {
    pub alert: Alert,
    pub previous_severity: AlertSeverity,
}

/// Payload for `on_alert_acknowledged`.
#[derive(Debug, Clone)]
pub struct AlertAcknowledgedEvent {
    pub alert: Alert,
}

/// Payload for `on_alert_snoozed`.
#[derive(Debug, Clone)]
pub struct AlertSnoozedEvent {
    pub alert: Alert,
    pub snoozed_until: DateTime<Utc>,
}

/// Payload for `on_alert_reactivated`.
#[derive(Debug, Clone)]
pub struct AlertReactivatedEvent {
    pub alert: Alert,
    /// True when the snooze deadline elapsed, false for an explicit unsnooze.
    pub expired: bool,
}

/// Payload for `on_alert_resolved`.
#[derive(Debug, Clone)]
pub struct AlertResolvedEvent {
    pub alert: Alert,
    pub previous_status: AlertStatus,
}
