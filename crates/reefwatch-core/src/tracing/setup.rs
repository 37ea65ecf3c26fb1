//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "REEFWATCH_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("reefwatch=info"))
}

/// Initialize human-readable logging.
///
/// Reads `REEFWATCH_LOG` for per-module levels, e.g.
/// `REEFWATCH_LOG=reefwatch_alerts=debug,reefwatch_analysis=info`.
/// Falls back to `reefwatch=info`.
///
/// Idempotent: only the first call (of either init function) installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter())
            .try_init();
    });
}

/// Initialize structured JSON logging with the same filter rules.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().json().with_target(true))
            .with(filter())
            .try_init();
    });
}
