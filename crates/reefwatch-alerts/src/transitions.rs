//! Pure alert transitions. Each takes the current record and returns the
//! next one, or `InvalidTransition` without touching the input.

use chrono::{DateTime, Duration, Utc};
use reefwatch_core::errors::AlertError;
use reefwatch_core::models::{Alert, AlertAction, AlertStatus};

fn invalid(alert: &Alert, action: AlertAction) -> AlertError {
    AlertError::InvalidTransition {
        alert_id: alert.id.clone(),
        from: alert.status,
        action,
    }
}

/// `active → acknowledged`.
pub fn acknowledge(alert: &Alert, now: DateTime<Utc>) -> Result<Alert, AlertError> {
    if alert.status != AlertStatus::Active {
        return Err(invalid(alert, AlertAction::Acknowledge));
    }
    let mut next = alert.clone();
    next.status = AlertStatus::Acknowledged;
    next.acknowledged_at = Some(now);
    Ok(next)
}

/// `now + duration`, saturating at the latest representable instant.
pub fn snooze_deadline(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    now.checked_add_signed(duration)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// `active → snoozed` until `now + duration`. The duration must be positive;
/// there is no upper bound.
pub fn snooze(alert: &Alert, duration: Duration, now: DateTime<Utc>) -> Result<Alert, AlertError> {
    if duration <= Duration::zero() {
        return Err(AlertError::InvalidSnoozeDuration {
            seconds: duration.num_seconds(),
        });
    }
    if alert.status != AlertStatus::Active {
        return Err(invalid(alert, AlertAction::Snooze));
    }
    let mut next = alert.clone();
    next.status = AlertStatus::Snoozed;
    next.snoozed_until = Some(snooze_deadline(now, duration));
    Ok(next)
}

/// `snoozed → active`, whether or not the deadline has passed.
pub fn unsnooze(alert: &Alert) -> Result<Alert, AlertError> {
    if alert.status != AlertStatus::Snoozed {
        return Err(invalid(alert, AlertAction::Unsnooze));
    }
    let mut next = alert.clone();
    next.status = AlertStatus::Active;
    next.snoozed_until = None;
    Ok(next)
}

/// `active | acknowledged → resolved`. Resolving a resolved alert returns
/// it unchanged.
pub fn resolve(alert: &Alert, now: DateTime<Utc>) -> Result<Alert, AlertError> {
    match alert.status {
        AlertStatus::Resolved => Ok(alert.clone()),
        AlertStatus::Active | AlertStatus::Acknowledged => {
            let mut next = alert.clone();
            next.status = AlertStatus::Resolved;
            next.resolved_at = Some(now);
            Ok(next)
        }
        AlertStatus::Snoozed => Err(invalid(alert, AlertAction::Resolve)),
    }
}

/// `snoozed → active` once `snoozed_until <= now`; `None` otherwise.
pub fn reactivate_if_expired(alert: &Alert, now: DateTime<Utc>) -> Option<Alert> {
    if !alert.snooze_expired(now) {
        return None;
    }
    let mut next = alert.clone();
    next.status = AlertStatus::Active;
    next.snoozed_until = None;
    Some(next)
}

/// Apply `action` by name. `Reactivate` only succeeds for an expired snooze.
pub fn apply(
    alert: &Alert,
    action: AlertAction,
    snooze_for: Duration,
    now: DateTime<Utc>,
) -> Result<Alert, AlertError> {
    match action {
        AlertAction::Acknowledge => acknowledge(alert, now),
        AlertAction::Snooze => snooze(alert, snooze_for, now),
        AlertAction::Unsnooze => unsnooze(alert),
        AlertAction::Resolve => resolve(alert, now),
        AlertAction::Reactivate => {
            reactivate_if_expired(alert, now).ok_or_else(|| invalid(alert, AlertAction::Reactivate))
        }
    }
}
