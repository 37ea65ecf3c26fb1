//! Span definitions per operation: analysis passes and alert transitions.

/// Create an analysis-pass span.
#[macro_export]
macro_rules! analysis_span {
    ($subject:expr, $test_count:expr) => {
        tracing::info_span!("reefwatch.analysis", subject = %$subject, tests = $test_count)
    };
}

/// Create an alert-transition span.
#[macro_export]
macro_rules! alert_span {
    ($action:expr, $alert_id:expr) => {
        tracing::debug_span!("reefwatch.alert", action = %$action, alert_id = %$alert_id)
    };
}
