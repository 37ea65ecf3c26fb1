//! Alert event system.
//! Trait with no-op defaults, synchronous dispatch, zero overhead when empty.
//!
//! Events are the hand-off point for notification delivery; this crate only
//! produces them.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::AlertEventHandler;
pub use types::*;
