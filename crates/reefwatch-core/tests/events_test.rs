use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use reefwatch_core::events::*;
use reefwatch_core::models::{Alert, AlertSeverity, AlertStatus, Classification, Parameter};

#[derive(Default)]
struct Counting {
    created: AtomicUsize,
    resolved: AtomicUsize,
}

impl AlertEventHandler for Counting {
    fn on_alert_created(&self, _event: &AlertCreatedEvent) {
        self.created.fetch_add(1, Ordering::SeqCst);
    }

    fn on_alert_resolved(&self, _event: &AlertResolvedEvent) {
        self.resolved.fetch_add(1, Ordering::SeqCst);
    }
}

struct Panicking;

impl AlertEventHandler for Panicking {
    fn on_alert_created(&self, _event: &AlertCreatedEvent) {
        panic!("handler failure");
    }
}

fn sample_alert() -> Alert {
    Alert::new("a-1", "tank", Parameter::Nitrite, 0.5, AlertSeverity::High, Utc::now())
}

#[test]
fn empty_dispatcher_is_a_no_op() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_alert_created(&AlertCreatedEvent {
        alert: sample_alert(),
        classification: Classification::Warning,
    });
}

#[test]
fn handlers_only_see_events_they_override() {
    let counting = Arc::new(Counting::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(counting.clone());

    dispatcher.emit_alert_created(&AlertCreatedEvent {
        alert: sample_alert(),
        classification: Classification::Warning,
    });
    dispatcher.emit_alert_acknowledged(&AlertAcknowledgedEvent {
        alert: sample_alert(),
    });
    dispatcher.emit_alert_resolved(&AlertResolvedEvent {
        alert: sample_alert(),
        previous_status: AlertStatus::Active,
    });

    assert_eq!(counting.created.load(Ordering::SeqCst), 1);
    assert_eq!(counting.resolved.load(Ordering::SeqCst), 1);
}

#[test]
fn panicking_handler_does_not_block_later_handlers() {
    let counting = Arc::new(Counting::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(Panicking));
    dispatcher.register(counting.clone());

    dispatcher.emit_alert_created(&AlertCreatedEvent {
        alert: sample_alert(),
        classification: Classification::Critical,
    });

    assert_eq!(counting.created.load(Ordering::SeqCst), 1);
}
