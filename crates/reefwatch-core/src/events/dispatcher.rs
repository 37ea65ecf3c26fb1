//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::AlertEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AlertEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn AlertEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn AlertEventHandler)>(&self, event_name: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!(event = event_name, "alert event handler panicked");
            }
        }
    }

    pub fn emit_alert_created(&self, event: &AlertCreatedEvent) {
        self.emit("alert_created", |h| h.on_alert_created(event));
    }

    pub fn emit_alert_escalated(&self, event: &AlertEscalatedEvent) {
        self.emit("alert_escalated", |h| h.on_alert_escalated(event));
    }

    pub fn emit_alert_acknowledged(&self, event: &AlertAcknowledgedEvent) {
        self.emit("alert_acknowledged", |h| h.on_alert_acknowledged(event));
    }

    pub fn emit_alert_snoozed(&self, event: &AlertSnoozedEvent) {
        self.emit("alert_snoozed", |h| h.on_alert_snoozed(event));
    }

    pub fn emit_alert_reactivated(&self, event: &AlertReactivatedEvent) {
        self.emit("alert_reactivated", |h| h.on_alert_reactivated(event));
    }

    pub fn emit_alert_resolved(&self, event: &AlertResolvedEvent) {
        self.emit("alert_resolved", |h| h.on_alert_resolved(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
