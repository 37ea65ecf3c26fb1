//! Alert records and their lifecycle vocabulary.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::parameter::Parameter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state. `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Snoozed,
    Resolved,
}

impl AlertStatus {
    /// Open alerts block creation of another alert for the same key.
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Resolved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Acknowledged => "acknowledged",
            Self::Snoozed => "snoozed",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-requested transition, used in error reporting and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertAction {
    Acknowledge,
    Snooze,
    Unsnooze,
    Resolve,
    Reactivate,
}

impl fmt::Display for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Acknowledge => "acknowledge",
            Self::Snooze => "snooze",
            Self::Unsnooze => "unsnooze",
            Self::Resolve => "resolve",
            Self::Reactivate => "reactivate",
        };
        f.write_str(s)
    }
}

/// Serialization key: at most one open alert exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlertKey {
    pub subject_id: String,
    pub parameter: Parameter,
}

impl AlertKey {
    pub fn new(subject_id: impl Into<String>, parameter: Parameter) -> Self {
        Self {
            subject_id: subject_id.into(),
            parameter,
        }
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject_id, self.parameter)
    }
}

/// A stateful record of an out-of-band condition. Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub subject_id: String,
    pub parameter: Parameter,
    pub measured_value: f64,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub triggered_at: DateTime<Utc>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub snoozed_until: Option<DateTime<Utc>>,
}

impl Alert {
    /// A fresh `Active` alert.
    pub fn new(
        id: impl Into<String>,
        subject_id: impl Into<String>,
        parameter: Parameter,
        measured_value: f64,
        severity: AlertSeverity,
        triggered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            parameter,
            measured_value,
            severity,
            status: AlertStatus::Active,
            triggered_at,
            acknowledged_at: None,
            resolved_at: None,
            snoozed_until: None,
        }
    }

    pub fn key(&self) -> AlertKey {
        AlertKey::new(self.subject_id.clone(), self.parameter.clone())
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Snoozed with a deadline at or before `now`.
    pub fn snooze_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == AlertStatus::Snoozed && self.snoozed_until.is_some_and(|until| until <= now)
    }
}

/// Filter for repository listing. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertQuery {
    pub subject_id: Option<String>,
    pub parameter: Option<Parameter>,
    pub status: Option<AlertStatus>,
}

impl AlertQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameter = Some(parameter);
        self
    }

    pub fn status(mut self, status: AlertStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        self.subject_id
            .as_ref()
            .map_or(true, |s| s == &alert.subject_id)
            && self.parameter.as_ref().map_or(true, |p| p == &alert.parameter)
            && self.status.map_or(true, |s| s == alert.status)
    }
}

/// Common snooze presets. Callers may also pass any positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnoozeDuration {
    OneHour,
    FourHours,
    OneDay,
    OneWeek,
}

impl From<SnoozeDuration> for Duration {
    fn from(preset: SnoozeDuration) -> Self {
        match preset {
            SnoozeDuration::OneHour => Duration::hours(1),
            SnoozeDuration::FourHours => Duration::hours(4),
            SnoozeDuration::OneDay => Duration::hours(24),
            SnoozeDuration::OneWeek => Duration::weeks(1),
        }
    }
}
