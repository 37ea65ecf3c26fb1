//! # reefwatch-core
//!
//! Foundation crate for the reefwatch water-quality engine.
//! Defines the measurement model, threshold bands, alert records, errors,
//! config, events, tracing setup, and the collaborator traits.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ReefwatchConfig;
pub use errors::{ReefwatchError, ReefwatchResult};
pub use models::{
    Alert, AlertSeverity, AlertStatus, Classification, Measurement, Parameter, ThresholdBand,
    ThresholdProfile, WaterTest,
};
