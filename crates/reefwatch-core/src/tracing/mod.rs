//! Observability for reefwatch.
//! `tracing` crate with `EnvFilter`, span helpers, and field names.

pub mod setup;
pub mod spans;

pub use setup::{init_tracing, init_tracing_json};
