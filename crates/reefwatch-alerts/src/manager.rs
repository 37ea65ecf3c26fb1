//! AlertLifecycleManager: per-key serialized transitions over an injected
//! repository.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use reefwatch_analysis::assess;
use reefwatch_core::alert_span;
use reefwatch_core::config::AlertConfig;
use reefwatch_core::errors::{AlertError, StorageError};
use reefwatch_core::events::{
    AlertAcknowledgedEvent, AlertCreatedEvent, AlertEscalatedEvent, AlertEventHandler,
    AlertReactivatedEvent, AlertResolvedEvent, AlertSnoozedEvent, EventDispatcher,
};
use reefwatch_core::models::{
    Alert, AlertAction, AlertKey, AlertQuery, AlertSeverity, AlertStatus, Classification,
    Measurement, ThresholdBand, ThresholdProfile, WaterTest,
};
use reefwatch_core::traits::IAlertRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::repository::InMemoryAlertRepository;
use crate::severity::severity_for;
use crate::transitions;

/// What evaluating one measurement did to the alert set.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// No breach; nothing changed.
    Clear { classification: Classification },
    /// A new alert was opened.
    Created(Alert),
    /// The open alert for the key was raised to a higher severity.
    Escalated(Alert),
    /// An alert was already open at the same or higher severity.
    Suppressed(Alert),
}

impl EvaluationOutcome {
    /// The alert involved, if any.
    pub fn alert(&self) -> Option<&Alert> {
        match self {
            Self::Clear { .. } => None,
            Self::Created(a) | Self::Escalated(a) | Self::Suppressed(a) => Some(a),
        }
    }

    /// The alert, only when this evaluation created it.
    pub fn created(&self) -> Option<&Alert> {
        match self {
            Self::Created(a) => Some(a),
            _ => None,
        }
    }
}

/// Alert counts by status, and open alerts by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub total: usize,
    pub active: usize,
    pub acknowledged: usize,
    pub snoozed: usize,
    pub resolved: usize,
    pub open_by_severity: BTreeMap<AlertSeverity, usize>,
}

impl AlertSummary {
    pub fn open(&self) -> usize {
        self.active + self.acknowledged + self.snoozed
    }
}

/// An event recorded while a key lock is held, dispatched once it is released.
#[derive(Debug)]
enum PendingEvent {
    Created(AlertCreatedEvent),
    Escalated(AlertEscalatedEvent),
    Reactivated(AlertReactivatedEvent),
}

/// Owns the alert state machine for every (subject, parameter) key.
///
/// Transitions on one key run under that key's mutex, so concurrent
/// acknowledge/resolve calls cannot lose updates. Different keys proceed
/// independently. Handlers are never called with a key lock held, so a
/// handler may call back into the manager.
pub struct AlertLifecycleManager {
    repository: Arc<dyn IAlertRepository>,
    config: AlertConfig,
    dispatcher: EventDispatcher,
    /// One mutex per (subject, parameter) key ever evaluated or transitioned.
    /// Entries are never evicted: the key set is bounded by subjects times
    /// tracked parameters, and removing an entry while another caller holds
    /// its `Arc` would let two callers lock different mutexes for one key.
    locks: DashMap<AlertKey, Arc<Mutex<()>>>,
}

impl AlertLifecycleManager {
    pub fn new(repository: Arc<dyn IAlertRepository>, config: AlertConfig) -> Self {
        Self {
            repository,
            config,
            dispatcher: EventDispatcher::new(),
            locks: DashMap::new(),
        }
    }

    /// Manager over a fresh [`InMemoryAlertRepository`] with default config.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryAlertRepository::new()), AlertConfig::default())
    }

    pub fn register_handler(&mut self, handler: Arc<dyn AlertEventHandler>) {
        self.dispatcher.register(handler);
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    // ── Evaluation ──────────────────────────────────────────────────────────

    /// Evaluate one measurement for `subject_id` against `band`.
    ///
    /// A `warning`/`critical` breach opens an alert unless one is already
    /// open for the key. A worse breach escalates the open alert in place.
    pub fn evaluate(
        &self,
        subject_id: &str,
        measurement: &Measurement,
        band: &ThresholdBand,
        now: DateTime<Utc>,
    ) -> Result<EvaluationOutcome, AlertError> {
        let Some(breach) = assess(measurement.value, band) else {
            return Ok(EvaluationOutcome::Clear {
                classification: Classification::Acceptable,
            });
        };
        let high_fraction = self.config.effective_high_severity_fraction();
        let Some(severity) = severity_for(&breach, high_fraction) else {
            return Ok(EvaluationOutcome::Clear {
                classification: breach.classification,
            });
        };

        let key = AlertKey::new(subject_id, measurement.parameter.clone());
        let mut pending = Vec::new();
        let outcome = {
            let lock = self.key_lock(&key);
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.evaluate_locked(&key, measurement, severity, breach.classification, now, &mut pending)
        };
        self.dispatch(pending);
        outcome
    }

    /// Caller must hold the lock for `key`.
    fn evaluate_locked(
        &self,
        key: &AlertKey,
        measurement: &Measurement,
        severity: AlertSeverity,
        classification: Classification,
        now: DateTime<Utc>,
        pending: &mut Vec<PendingEvent>,
    ) -> Result<EvaluationOutcome, AlertError> {
        if let Some(open) = self.open_alert(key)? {
            let open = self.reactivate_locked(open, now, pending)?;
            if severity <= open.severity {
                tracing::debug!(
                    alert_id = %open.id,
                    key = %key,
                    severity = %severity,
                    "breach suppressed, alert already open"
                );
                return Ok(EvaluationOutcome::Suppressed(open));
            }

            let previous_severity = open.severity;
            let mut escalated = open;
            escalated.severity = severity;
            escalated.measured_value = measurement.value;
            self.repository.put(&escalated)?;
            tracing::info!(
                alert_id = %escalated.id,
                key = %key,
                from = %previous_severity,
                to = %severity,
                "alert escalated"
            );
            pending.push(PendingEvent::Escalated(AlertEscalatedEvent {
                alert: escalated.clone(),
                previous_severity,
            }));
            return Ok(EvaluationOutcome::Escalated(escalated));
        }

        let alert = Alert::new(
            Uuid::new_v4().to_string(),
            key.subject_id.clone(),
            measurement.parameter.clone(),
            measurement.value,
            severity,
            now,
        );
        self.repository.put(&alert)?;
        tracing::info!(
            alert_id = %alert.id,
            key = %key,
            value = measurement.value,
            severity = %severity,
            "alert created"
        );
        pending.push(PendingEvent::Created(AlertCreatedEvent {
            alert: alert.clone(),
            classification,
        }));
        Ok(EvaluationOutcome::Created(alert))
    }

    /// Evaluate every measurement of `test` that has a band in `profile`.
    pub fn evaluate_test(
        &self,
        test: &WaterTest,
        profile: &ThresholdProfile,
        now: DateTime<Utc>,
    ) -> Result<Vec<EvaluationOutcome>, AlertError> {
        test.measurements
            .iter()
            .filter_map(|m| profile.band(&m.parameter).map(|band| (m, band)))
            .map(|(m, band)| self.evaluate(&test.subject_id, m, band, now))
            .collect()
    }

    // ── Transitions ─────────────────────────────────────────────────────────

    /// `active → acknowledged`.
    pub fn acknowledge(&self, id: &str, now: DateTime<Utc>) -> Result<Alert, AlertError> {
        let (_, next) = self.transition(id, AlertAction::Acknowledge, now, |a| {
            transitions::acknowledge(a, now)
        })?;
        self.dispatcher
            .emit_alert_acknowledged(&AlertAcknowledgedEvent { alert: next.clone() });
        Ok(next)
    }

    /// `active → snoozed` until `now + duration`. Accepts a
    /// [`SnoozeDuration`](reefwatch_core::models::SnoozeDuration) preset or
    /// any positive [`Duration`].
    pub fn snooze(
        &self,
        id: &str,
        duration: impl Into<Duration>,
        now: DateTime<Utc>,
    ) -> Result<Alert, AlertError> {
        let duration = duration.into();
        let (_, next) = self.transition(id, AlertAction::Snooze, now, |a| {
            transitions::snooze(a, duration, now)
        })?;
        let snoozed_until = next
            .snoozed_until
            .unwrap_or_else(|| transitions::snooze_deadline(now, duration));
        self.dispatcher.emit_alert_snoozed(&AlertSnoozedEvent {
            alert: next.clone(),
            snoozed_until,
        });
        Ok(next)
    }

    /// Explicit `snoozed → active`.
    pub fn unsnooze(&self, id: &str, now: DateTime<Utc>) -> Result<Alert, AlertError> {
        let (_, next) = self.transition(id, AlertAction::Unsnooze, now, transitions::unsnooze)?;
        self.dispatcher.emit_alert_reactivated(&AlertReactivatedEvent {
            alert: next.clone(),
            expired: false,
        });
        Ok(next)
    }

    /// `active | acknowledged → resolved`. Idempotent on a resolved alert.
    pub fn resolve(&self, id: &str, now: DateTime<Utc>) -> Result<Alert, AlertError> {
        let (previous, next) = self.transition(id, AlertAction::Resolve, now, |a| {
            transitions::resolve(a, now)
        })?;
        if previous.status != AlertStatus::Resolved {
            self.dispatcher.emit_alert_resolved(&AlertResolvedEvent {
                alert: next.clone(),
                previous_status: previous.status,
            });
        }
        Ok(next)
    }

    /// Return every snoozed alert whose deadline has passed to `active`.
    pub fn reactivate_expired(&self, now: DateTime<Utc>) -> Result<Vec<Alert>, AlertError> {
        self.reactivate_matching(AlertQuery::all(), now)
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    /// Number of (subject, parameter) keys with a lock entry.
    pub fn tracked_keys(&self) -> usize {
        self.locks.len()
    }

    pub fn get(&self, id: &str) -> Result<Alert, AlertError> {
        self.repository
            .get(id)?
            .ok_or_else(|| AlertError::NotFound { id: id.to_string() })
    }

    /// Open alerts for `subject_id`, oldest first. Expired snoozes are
    /// reactivated first unless `alerts.reactivate_on_read` is off.
    pub fn current_alerts(
        &self,
        subject_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Alert>, AlertError> {
        if self.config.effective_reactivate_on_read() {
            self.reactivate_matching(AlertQuery::all().subject(subject_id), now)?;
        }
        let alerts = self.repository.list(&AlertQuery::all().subject(subject_id))?;
        Ok(alerts.into_iter().filter(Alert::is_open).collect())
    }

    /// Every alert ever raised for `subject_id`, resolved ones included.
    pub fn history(&self, subject_id: &str) -> Result<Vec<Alert>, AlertError> {
        Ok(self.repository.list(&AlertQuery::all().subject(subject_id))?)
    }

    /// Counts across one subject, or every subject when `None`.
    pub fn summary(&self, subject_id: Option<&str>) -> Result<AlertSummary, AlertError> {
        let query = match subject_id {
            Some(subject) => AlertQuery::all().subject(subject),
            None => AlertQuery::all(),
        };
        let mut summary = AlertSummary::default();
        for alert in self.repository.list(&query)? {
            summary.total += 1;
            match alert.status {
                AlertStatus::Active => summary.active += 1,
                AlertStatus::Acknowledged => summary.acknowledged += 1,
                AlertStatus::Snoozed => summary.snoozed += 1,
                AlertStatus::Resolved => summary.resolved += 1,
            }
            if alert.is_open() {
                *summary.open_by_severity.entry(alert.severity).or_insert(0) += 1;
            }
        }
        Ok(summary)
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn dispatch(&self, pending: Vec<PendingEvent>) {
        for event in pending {
            match event {
                PendingEvent::Created(e) => self.dispatcher.emit_alert_created(&e),
                PendingEvent::Escalated(e) => self.dispatcher.emit_alert_escalated(&e),
                PendingEvent::Reactivated(e) => self.dispatcher.emit_alert_reactivated(&e),
            }
        }
    }

    fn key_lock(&self, key: &AlertKey) -> Arc<Mutex<()>> {
        Arc::clone(
            self.locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }

    fn open_alert(&self, key: &AlertKey) -> Result<Option<Alert>, StorageError> {
        let query = AlertQuery::all()
            .subject(key.subject_id.clone())
            .parameter(key.parameter.clone());
        Ok(self.repository.list(&query)?.into_iter().find(Alert::is_open))
    }

    /// Load `id` under its key lock, lazily reactivate an expired snooze,
    /// then apply `step`. Returns the record before and after the step.
    fn transition<F>(
        &self,
        id: &str,
        action: AlertAction,
        now: DateTime<Utc>,
        step: F,
    ) -> Result<(Alert, Alert), AlertError>
    where
        F: FnOnce(&Alert) -> Result<Alert, AlertError>,
    {
        let span = alert_span!(action, id);
        let _entered = span.enter();

        let key = self.get(id)?.key();
        let mut pending = Vec::new();
        let result = {
            let lock = self.key_lock(&key);
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.transition_locked(id, &key, action, now, step, &mut pending)
        };
        self.dispatch(pending);
        result
    }

    /// Caller must hold the lock for `key`.
    fn transition_locked<F>(
        &self,
        id: &str,
        key: &AlertKey,
        action: AlertAction,
        now: DateTime<Utc>,
        step: F,
        pending: &mut Vec<PendingEvent>,
    ) -> Result<(Alert, Alert), AlertError>
    where
        F: FnOnce(&Alert) -> Result<Alert, AlertError>,
    {
        let mut current = self.get(id)?;
        if action != AlertAction::Unsnooze {
            current = self.reactivate_locked(current, now, pending)?;
        }

        let next = match step(&current) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(alert_id = %id, status = %current.status, error = %e, "transition rejected");
                return Err(e);
            }
        };
        if next != current {
            self.repository.put(&next)?;
            tracing::info!(
                alert_id = %id,
                key = %key,
                from = %current.status,
                to = %next.status,
                "alert transitioned"
            );
        }
        Ok((current, next))
    }

    /// Caller must hold the key lock.
    fn reactivate_locked(
        &self,
        alert: Alert,
        now: DateTime<Utc>,
        pending: &mut Vec<PendingEvent>,
    ) -> Result<Alert, AlertError> {
        let Some(next) = transitions::reactivate_if_expired(&alert, now) else {
            return Ok(alert);
        };
        self.repository.put(&next)?;
        tracing::info!(alert_id = %next.id, key = %next.key(), "snooze expired, alert reactivated");
        pending.push(PendingEvent::Reactivated(AlertReactivatedEvent {
            alert: next.clone(),
            expired: true,
        }));
        Ok(next)
    }

    fn reactivate_matching(
        &self,
        query: AlertQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Alert>, AlertError> {
        let candidates = self.repository.list(&query.status(AlertStatus::Snoozed))?;
        let mut pending = Vec::new();
        let result = self.reactivate_candidates(candidates, now, &mut pending);
        self.dispatch(pending);
        result
    }

    fn reactivate_candidates(
        &self,
        candidates: Vec<Alert>,
        now: DateTime<Utc>,
        pending: &mut Vec<PendingEvent>,
    ) -> Result<Vec<Alert>, AlertError> {
        let mut reactivated = Vec::new();
        for candidate in candidates.into_iter().filter(|a| a.snooze_expired(now)) {
            let lock = self.key_lock(&candidate.key());
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            // Re-read: another caller may have moved it since listing.
            let current = self.get(&candidate.id)?;
            if current.snooze_expired(now) {
                reactivated.push(self.reactivate_locked(current, now, pending)?);
            }
        }
        Ok(reactivated)
    }
}

impl std::fmt::Debug for AlertLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertLifecycleManager")
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .field("tracked_keys", &self.locks.len())
            .finish()
    }
}
