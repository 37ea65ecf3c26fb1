//! Alert lifecycle through the manager: creation, single-open invariant,
//! transitions, lazy snooze expiry, reads and events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, OnceLock, Weak};
use std::thread;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use reefwatch_alerts::{AlertLifecycleManager, EvaluationOutcome, InMemoryAlertRepository};
use reefwatch_core::config::AlertConfig;
use reefwatch_core::errors::{AlertError, ReefwatchErrorCode};
use reefwatch_core::events::*;
use reefwatch_core::models::{
    AlertAction, AlertSeverity, AlertStatus, Classification, Parameter, SnoozeDuration,
    TankCategory, ThresholdBand, ThresholdProfile,
};
use reefwatch_fixtures::{day, epoch, measurement, tests_from_rows};

fn ammonia_band() -> ThresholdBand {
    ThresholdBand::upper(0.0, 0.25, 1.0)
}

fn raise(manager: &AlertLifecycleManager, subject: &str, value: f64) -> EvaluationOutcome {
    manager
        .evaluate(subject, &measurement(Parameter::Ammonia, value, epoch()), &ammonia_band(), epoch())
        .unwrap()
}

fn open_alert(manager: &AlertLifecycleManager) -> String {
    raise(manager, "tank-1", 0.6).created().unwrap().id.clone()
}

#[test]
fn non_breach_creates_nothing() {
    let manager = AlertLifecycleManager::in_memory();
    assert_eq!(
        raise(&manager, "tank-1", 0.0),
        EvaluationOutcome::Clear { classification: Classification::Ideal }
    );
    assert_eq!(
        raise(&manager, "tank-1", 0.2),
        EvaluationOutcome::Clear { classification: Classification::Acceptable }
    );
    assert!(manager.history("tank-1").unwrap().is_empty());
}

#[test]
fn breach_creates_active_alert_at_evaluation_time() {
    let manager = AlertLifecycleManager::in_memory();
    let outcome = raise(&manager, "tank-1", 0.6);
    let alert = outcome.created().unwrap();
    assert_eq!(alert.status, AlertStatus::Active);
    assert_eq!(alert.severity, AlertSeverity::Critical);
    assert_eq!(alert.triggered_at, epoch());
    assert_eq!(alert.measured_value, 0.6);
    assert_eq!(alert.parameter, Parameter::Ammonia);
}

#[test]
fn warning_severity_depends_on_depth() {
    let manager = AlertLifecycleManager::in_memory();
    assert_eq!(raise(&manager, "a", 0.3).created().unwrap().severity, AlertSeverity::Medium);
    assert_eq!(raise(&manager, "b", 0.45).created().unwrap().severity, AlertSeverity::High);
}

#[test]
fn high_severity_fraction_is_configurable() {
    let config = AlertConfig {
        high_severity_fraction: Some(0.1),
        ..Default::default()
    };
    let manager = AlertLifecycleManager::new(Arc::new(InMemoryAlertRepository::new()), config);
    assert_eq!(raise(&manager, "a", 0.3).created().unwrap().severity, AlertSeverity::High);
}

#[test]
fn second_breach_while_open_is_suppressed() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    let again = raise(&manager, "tank-1", 0.7);
    assert!(matches!(&again, EvaluationOutcome::Suppressed(a) if a.id == id));
    assert_eq!(manager.history("tank-1").unwrap().len(), 1);
}

#[test]
fn worse_breach_escalates_open_alert() {
    let manager = AlertLifecycleManager::in_memory();
    let id = raise(&manager, "tank-1", 0.3).created().unwrap().id.clone();
    let outcome = raise(&manager, "tank-1", 0.6);
    match outcome {
        EvaluationOutcome::Escalated(alert) => {
            assert_eq!(alert.id, id);
            assert_eq!(alert.severity, AlertSeverity::Critical);
            assert_eq!(alert.measured_value, 0.6);
        }
        other => panic!("expected escalation, got {other:?}"),
    }
    assert_eq!(manager.history("tank-1").unwrap().len(), 1);
}

#[test]
fn escalating_acknowledged_alert_keeps_it_acknowledged() {
    let recorder = Arc::new(Recorder::default());
    let mut manager = AlertLifecycleManager::in_memory();
    manager.register_handler(recorder.clone());

    let id = raise(&manager, "tank-1", 0.3).created().unwrap().id.clone();
    manager.acknowledge(&id, epoch()).unwrap();

    match raise(&manager, "tank-1", 0.6) {
        EvaluationOutcome::Escalated(alert) => {
            assert_eq!(alert.id, id);
            assert_eq!(alert.status, AlertStatus::Acknowledged);
            assert_eq!(alert.severity, AlertSeverity::Critical);
            assert_eq!(alert.acknowledged_at, Some(epoch()));
        }
        other => panic!("expected escalation, got {other:?}"),
    }
    assert_eq!(recorder.escalated.load(Ordering::SeqCst), 1);
    assert_eq!(manager.get(&id).unwrap().status, AlertStatus::Acknowledged);
}

#[test]
fn lock_table_holds_one_entry_per_key() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    for _ in 0..50 {
        raise(&manager, "tank-1", 0.6);
        raise(&manager, "tank-1", 0.1);
    }
    manager.acknowledge(&id, day(1)).unwrap();
    manager.resolve(&id, day(2)).unwrap();
    raise(&manager, "tank-1", 0.6);
    assert_eq!(manager.tracked_keys(), 1);

    raise(&manager, "tank-2", 0.6);
    assert_eq!(manager.tracked_keys(), 2);
}

#[test]
fn keys_are_independent() {
    let manager = AlertLifecycleManager::in_memory();
    open_alert(&manager);
    assert!(raise(&manager, "tank-2", 0.6).created().is_some());
    let nitrite = manager
        .evaluate("tank-1", &measurement(Parameter::Nitrite, 0.6, epoch()), &ammonia_band(), epoch())
        .unwrap();
    assert!(nitrite.created().is_some());
}

#[test]
fn acknowledge_then_resolve() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);

    let acked = manager.acknowledge(&id, day(1)).unwrap();
    assert_eq!(acked.status, AlertStatus::Acknowledged);
    assert_eq!(acked.acknowledged_at, Some(day(1)));

    let resolved = manager.resolve(&id, day(2)).unwrap();
    assert_eq!(resolved.status, AlertStatus::Resolved);
    assert_eq!(resolved.resolved_at, Some(day(2)));
    assert_eq!(manager.get(&id).unwrap(), resolved);
}

#[test]
fn resolving_twice_is_a_no_op() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    let first = manager.resolve(&id, day(1)).unwrap();
    let second = manager.resolve(&id, day(5)).unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.get(&id).unwrap().resolved_at, Some(day(1)));
}

#[test]
fn breach_after_resolution_opens_new_identity() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    manager.resolve(&id, day(1)).unwrap();

    let fresh = raise(&manager, "tank-1", 0.6);
    let fresh_id = fresh.created().unwrap().id.clone();
    assert_ne!(fresh_id, id);
    assert_eq!(manager.history("tank-1").unwrap().len(), 2);
    assert_eq!(manager.get(&id).unwrap().status, AlertStatus::Resolved);
}

#[test]
fn invalid_transition_is_typed_and_leaves_state() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    manager.resolve(&id, day(1)).unwrap();

    let err = manager.acknowledge(&id, day(2)).unwrap_err();
    match &err {
        AlertError::InvalidTransition { alert_id, from, action } => {
            assert_eq!(alert_id, &id);
            assert_eq!(*from, AlertStatus::Resolved);
            assert_eq!(*action, AlertAction::Acknowledge);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.error_code(), "INVALID_TRANSITION");
    assert_eq!(manager.get(&id).unwrap().status, AlertStatus::Resolved);
}

#[test]
fn unknown_id_is_not_found() {
    let manager = AlertLifecycleManager::in_memory();
    assert!(matches!(
        manager.acknowledge("missing", epoch()),
        Err(AlertError::NotFound { .. })
    ));
}

#[test]
fn snooze_accepts_presets_and_rejects_non_positive() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);

    assert!(matches!(
        manager.snooze(&id, Duration::zero(), epoch()),
        Err(AlertError::InvalidSnoozeDuration { .. })
    ));
    assert_eq!(manager.get(&id).unwrap().status, AlertStatus::Active);

    let snoozed = manager.snooze(&id, SnoozeDuration::FourHours, epoch()).unwrap();
    assert_eq!(snoozed.status, AlertStatus::Snoozed);
    assert_eq!(snoozed.snoozed_until, Some(epoch() + Duration::hours(4)));
}

#[test]
fn huge_snooze_saturates_deadline() {
    let recorder = Arc::new(Recorder::default());
    let mut manager = AlertLifecycleManager::in_memory();
    manager.register_handler(recorder.clone());
    let id = open_alert(&manager);

    let snoozed = manager.snooze(&id, Duration::days(200_000_000), epoch()).unwrap();
    assert_eq!(snoozed.status, AlertStatus::Snoozed);
    assert_eq!(snoozed.snoozed_until, Some(DateTime::<Utc>::MAX_UTC));
    assert_eq!(recorder.snoozed.load(Ordering::SeqCst), 1);
    assert!(manager.reactivate_expired(day(10_000)).unwrap().is_empty());
}

#[test]
fn snoozed_alert_cannot_be_resolved_or_acknowledged() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    manager.snooze(&id, SnoozeDuration::OneDay, epoch()).unwrap();

    let now = epoch() + Duration::hours(1);
    assert!(manager.resolve(&id, now).is_err());
    assert!(manager.acknowledge(&id, now).is_err());
}

#[test]
fn expired_snooze_reactivates_lazily_before_transition() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    manager.snooze(&id, SnoozeDuration::OneHour, epoch()).unwrap();

    let acked = manager.acknowledge(&id, epoch() + Duration::hours(2)).unwrap();
    assert_eq!(acked.status, AlertStatus::Acknowledged);
    assert_eq!(acked.snoozed_until, None);
}

#[test]
fn unsnooze_returns_to_active() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    manager.snooze(&id, SnoozeDuration::OneWeek, epoch()).unwrap();
    let active = manager.unsnooze(&id, epoch() + Duration::hours(1)).unwrap();
    assert_eq!(active.status, AlertStatus::Active);
    assert!(manager.unsnooze(&id, epoch() + Duration::hours(2)).is_err());
}

#[test]
fn reactivate_expired_sweeps_only_elapsed_snoozes() {
    let manager = AlertLifecycleManager::in_memory();
    let short = raise(&manager, "a", 0.6).created().unwrap().id.clone();
    let long = raise(&manager, "b", 0.6).created().unwrap().id.clone();
    manager.snooze(&short, SnoozeDuration::OneHour, epoch()).unwrap();
    manager.snooze(&long, SnoozeDuration::OneWeek, epoch()).unwrap();

    let reactivated = manager.reactivate_expired(epoch() + Duration::hours(1)).unwrap();
    assert_eq!(reactivated.len(), 1);
    assert_eq!(reactivated[0].id, short);
    assert_eq!(manager.get(&long).unwrap().status, AlertStatus::Snoozed);
    assert!(manager.reactivate_expired(epoch() + Duration::hours(1)).unwrap().is_empty());
}

#[test]
fn current_alerts_reactivate_on_read() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    manager.snooze(&id, SnoozeDuration::OneHour, epoch()).unwrap();

    let current = manager.current_alerts("tank-1", epoch() + Duration::hours(3)).unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].status, AlertStatus::Active);
}

#[test]
fn reactivate_on_read_can_be_disabled() {
    let config = AlertConfig {
        reactivate_on_read: Some(false),
        ..Default::default()
    };
    let manager = AlertLifecycleManager::new(Arc::new(InMemoryAlertRepository::new()), config);
    let id = open_alert(&manager);
    manager.snooze(&id, SnoozeDuration::OneHour, epoch()).unwrap();

    let current = manager.current_alerts("tank-1", epoch() + Duration::hours(3)).unwrap();
    assert_eq!(current[0].status, AlertStatus::Snoozed);
}

#[test]
fn current_alerts_exclude_resolved_but_history_keeps_them() {
    let manager = AlertLifecycleManager::in_memory();
    let id = open_alert(&manager);
    manager.resolve(&id, day(1)).unwrap();
    assert!(manager.current_alerts("tank-1", day(2)).unwrap().is_empty());
    assert_eq!(manager.history("tank-1").unwrap().len(), 1);
}

#[test]
fn summary_counts_statuses_and_open_severities() {
    let manager = AlertLifecycleManager::in_memory();
    let a = raise(&manager, "a", 0.6).created().unwrap().id.clone();
    raise(&manager, "b", 0.3);
    let c = raise(&manager, "c", 0.6).created().unwrap().id.clone();
    manager.acknowledge(&a, day(1)).unwrap();
    manager.resolve(&c, day(1)).unwrap();

    let summary = manager.summary(None).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.active, 1);
    assert_eq!(summary.acknowledged, 1);
    assert_eq!(summary.resolved, 1);
    assert_eq!(summary.open(), 2);
    assert_eq!(summary.open_by_severity.get(&AlertSeverity::Critical), Some(&1));
    assert_eq!(summary.open_by_severity.get(&AlertSeverity::Medium), Some(&1));

    assert_eq!(manager.summary(Some("a")).unwrap().total, 1);
}

#[test]
fn evaluate_test_uses_profile_bands() {
    let manager = AlertLifecycleManager::in_memory();
    let profile = ThresholdProfile::for_category(TankCategory::Freshwater);
    let tests = tests_from_rows(
        "tank-1",
        epoch(),
        1,
        &[vec![
            (Parameter::Ph, 7.2),
            (Parameter::Ammonia, 2.0),
            (Parameter::parse("copper"), 9.0),
        ]],
    );
    let outcomes = manager.evaluate_test(&tests[0], &profile, epoch()).unwrap();
    assert_eq!(outcomes.len(), 2);
    let created: Vec<_> = outcomes.iter().filter_map(EvaluationOutcome::created).collect();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].parameter, Parameter::Ammonia);
}

#[derive(Default)]
struct Recorder {
    created: AtomicUsize,
    escalated: AtomicUsize,
    acknowledged: AtomicUsize,
    snoozed: AtomicUsize,
    reactivated_expired: AtomicUsize,
    reactivated_manual: AtomicUsize,
    resolved: AtomicUsize,
}

impl AlertEventHandler for Recorder {
    fn on_alert_created(&self, _event: &AlertCreatedEvent) {
        self.created.fetch_add(1, Ordering::SeqCst);
    }
    fn on_alert_escalated(&self, _event: &AlertEscalatedEvent) {
        self.escalated.fetch_add(1, Ordering::SeqCst);
    }
    fn on_alert_acknowledged(&self, _event: &AlertAcknowledgedEvent) {
        self.acknowledged.fetch_add(1, Ordering::SeqCst);
    }
    fn on_alert_snoozed(&self, _event: &AlertSnoozedEvent) {
        self.snoozed.fetch_add(1, Ordering::SeqCst);
    }
    fn on_alert_reactivated(&self, event: &AlertReactivatedEvent) {
        if event.expired {
            self.reactivated_expired.fetch_add(1, Ordering::SeqCst);
        } else {
            self.reactivated_manual.fetch_add(1, Ordering::SeqCst);
        }
    }
    fn on_alert_resolved(&self, _event: &AlertResolvedEvent) {
        self.resolved.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn transitions_emit_events_once() {
    let recorder = Arc::new(Recorder::default());
    let mut manager = AlertLifecycleManager::in_memory();
    manager.register_handler(recorder.clone());

    let id = raise(&manager, "tank-1", 0.3).created().unwrap().id.clone();
    raise(&manager, "tank-1", 0.6);
    raise(&manager, "tank-1", 0.6);
    manager.snooze(&id, SnoozeDuration::OneHour, epoch()).unwrap();
    manager.reactivate_expired(epoch() + Duration::hours(2)).unwrap();
    manager.snooze(&id, SnoozeDuration::OneHour, epoch() + Duration::hours(2)).unwrap();
    manager.unsnooze(&id, epoch() + Duration::hours(2)).unwrap();
    manager.acknowledge(&id, day(1)).unwrap();
    manager.resolve(&id, day(2)).unwrap();
    manager.resolve(&id, day(3)).unwrap();
    let _ = manager.acknowledge(&id, day(3));

    assert_eq!(recorder.created.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.escalated.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.snoozed.load(Ordering::SeqCst), 2);
    assert_eq!(recorder.reactivated_expired.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.reactivated_manual.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.acknowledged.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.resolved.load(Ordering::SeqCst), 1);
}

/// Acknowledges every alert as soon as it is created.
#[derive(Default)]
struct AutoAcknowledge {
    manager: OnceLock<Weak<AlertLifecycleManager>>,
}

impl AlertEventHandler for AutoAcknowledge {
    fn on_alert_created(&self, event: &AlertCreatedEvent) {
        if let Some(manager) = self.manager.get().and_then(Weak::upgrade) {
            manager.acknowledge(&event.alert.id, event.alert.triggered_at).unwrap();
        }
    }
}

#[test]
fn handler_can_call_back_into_manager() {
    let handler = Arc::new(AutoAcknowledge::default());
    let mut manager = AlertLifecycleManager::in_memory();
    manager.register_handler(handler.clone());
    let manager = Arc::new(manager);
    handler.manager.set(Arc::downgrade(&manager)).unwrap();

    let (tx, rx) = mpsc::channel();
    let worker = Arc::clone(&manager);
    thread::spawn(move || {
        let _ = tx.send(raise(&worker, "tank-1", 0.6));
    });
    let outcome = rx
        .recv_timeout(StdDuration::from_secs(5))
        .expect("evaluate deadlocked while dispatching to a re-entrant handler");

    let id = outcome.created().unwrap().id.clone();
    assert_eq!(manager.get(&id).unwrap().status, AlertStatus::Acknowledged);
}
