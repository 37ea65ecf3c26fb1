//! AlertEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing alert transitions.
///
/// Handlers only override the events they care about. `Send + Sync` is
/// required because transitions may be driven from several threads.
pub trait AlertEventHandler: Send + Sync {
    fn on_alert_created(&self, _event: &AlertCreatedEvent) {}
    fn on_alert_escalated(&self, _event: &AlertEscalatedEvent) {}
    fn on_alert_acknowledged(&self, _event: &AlertAcknowledgedEvent) {}
    fn on_alert_snoozed(&self, _event: &AlertSnoozedEvent) {}
    fn on_alert_reactivated(&self, _event: &AlertReactivatedEvent) {}
    fn on_alert_resolved(&self, _event: &AlertResolvedEvent) {}
}
