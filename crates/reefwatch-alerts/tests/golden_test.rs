//! Golden fixtures: the transition table and the ammonia round trip.

use chrono::Duration;
use reefwatch_alerts::transitions;
use reefwatch_alerts::AlertLifecycleManager;
use reefwatch_analysis::classify;
use reefwatch_core::errors::AlertError;
use reefwatch_core::models::{
    Alert, AlertAction, AlertSeverity, AlertStatus, Classification, Parameter, ThresholdBand,
};
use reefwatch_fixtures::{day, epoch, load_fixture, measurement};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TransitionFixture {
    valid_transitions: Vec<TransitionCase>,
    invalid_transitions: Vec<TransitionCase>,
}

#[derive(Debug, Deserialize)]
struct TransitionCase {
    from: AlertStatus,
    action: AlertAction,
    to: Option<AlertStatus>,
}

fn alert_in(status: AlertStatus) -> Alert {
    let mut alert = Alert::new("golden", "tank", Parameter::Ammonia, 0.6, AlertSeverity::Critical, epoch());
    alert.status = status;
    if status == AlertStatus::Snoozed {
        alert.snoozed_until = Some(epoch() + Duration::days(30));
    }
    alert
}

#[test]
fn golden_transition_table() {
    let fixture: TransitionFixture = load_fixture("golden/alert_transitions.json");
    let now = epoch() + Duration::hours(1);

    for case in &fixture.valid_transitions {
        let before = alert_in(case.from);
        let after = transitions::apply(&before, case.action, Duration::hours(1), now)
            .unwrap_or_else(|e| panic!("{:?} --{}--> should succeed: {e}", case.from, case.action));
        assert_eq!(Some(after.status), case.to, "{:?} --{}-->", case.from, case.action);
    }

    for case in &fixture.invalid_transitions {
        let before = alert_in(case.from);
        let err = transitions::apply(&before, case.action, Duration::hours(1), now).unwrap_err();
        assert!(
            matches!(err, AlertError::InvalidTransition { from, action, .. } if from == case.from && action == case.action),
            "{:?} --{}--> gave {err:?}",
            case.from,
            case.action
        );
    }
}

#[derive(Debug, Deserialize)]
struct RoundTripFixture {
    subject_id: String,
    parameter: Parameter,
    band: ThresholdBand,
    readings: Vec<Reading>,
    expected_alerts: usize,
    expected_severity: AlertSeverity,
}

#[derive(Debug, Deserialize)]
struct Reading {
    day: i64,
    value: f64,
    expected_classification: Classification,
}

#[test]
fn golden_ammonia_round_trip_last_breach() {
    let fixture: RoundTripFixture = load_fixture("golden/ammonia_round_trip.json");

    let got: Vec<Classification> = fixture
        .readings
        .iter()
        .map(|r| classify(r.value, &fixture.band))
        .collect();
    let expected: Vec<Classification> = fixture
        .readings
        .iter()
        .map(|r| r.expected_classification)
        .collect();
    assert_eq!(got, expected);

    let manager = AlertLifecycleManager::in_memory();
    let last = fixture.readings.last().unwrap();
    let m = measurement(fixture.parameter.clone(), last.value, day(last.day));
    manager
        .evaluate(&fixture.subject_id, &m, &fixture.band, day(last.day))
        .unwrap();

    let alerts = manager.history(&fixture.subject_id).unwrap();
    assert_eq!(alerts.len(), fixture.expected_alerts);
    assert_eq!(alerts[0].severity, fixture.expected_severity);
}

#[test]
fn golden_ammonia_round_trip_sequential() {
    let fixture: RoundTripFixture = load_fixture("golden/ammonia_round_trip.json");
    let manager = AlertLifecycleManager::in_memory();

    for reading in &fixture.readings {
        let m = measurement(fixture.parameter.clone(), reading.value, day(reading.day));
        manager
            .evaluate(&fixture.subject_id, &m, &fixture.band, day(reading.day))
            .unwrap();
    }

    let alerts = manager.history(&fixture.subject_id).unwrap();
    assert_eq!(alerts.len(), fixture.expected_alerts);
    assert_eq!(alerts[0].severity, fixture.expected_severity);
    assert_eq!(alerts[0].status, AlertStatus::Active);
    assert_eq!(alerts[0].triggered_at, day(1));
}
