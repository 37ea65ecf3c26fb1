//! # reefwatch-alerts
//!
//! Alert lifecycle for threshold breaches.
//!
//! At most one open alert (`active`, `acknowledged` or `snoozed`) exists per
//! (subject, parameter). Transitions are pure functions in [`transitions`];
//! [`AlertLifecycleManager`] serializes them per key, persists through an
//! injected [`IAlertRepository`](reefwatch_core::traits::IAlertRepository),
//! and emits events. Snooze expiry is evaluated lazily against the `now`
//! the caller passes in; nothing here runs a timer.

pub mod manager;
pub mod repository;
pub mod severity;
pub mod transitions;

pub use manager::{AlertLifecycleManager, AlertSummary, EvaluationOutcome};
pub use repository::InMemoryAlertRepository;
pub use severity::severity_for;
