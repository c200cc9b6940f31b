// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    COMMANDS_TOTAL,
    COMMAND_DURATION,
    UPSTREAM_ATTEMPTS,
    UPSTREAM_DURATION,
    CACHE_OPERATIONS,
    CACHE_ENTRIES,
};

/// Helper to record a handled command
pub fn record_command(command: &str, outcome: &str, duration_secs: f64) {
    COMMANDS_TOTAL
        .with_label_values(&[command, outcome])
        .inc();

    COMMAND_DURATION
        .with_label_values(&[command])
        .observe(duration_secs);
}

/// Helper to record one upstream HTTP attempt
pub fn record_upstream_attempt(source: &str, status: Option<u16>) {
    let status = status.map_or_else(|| "transport".to_string(), |s| s.to_string());
    UPSTREAM_ATTEMPTS
        .with_label_values(&[source, &status])
        .inc();
}

/// Helper to record a complete fetch, retries included
pub fn record_upstream_fetch(source: &str, success: bool, duration_secs: f64) {
    let outcome = if success { "success" } else { "failure" };
    UPSTREAM_DURATION
        .with_label_values(&[source, outcome])
        .observe(duration_secs);
}

/// Helper to record cache operations
pub fn record_cache_operation(operation: &str) {
    CACHE_OPERATIONS.with_label_values(&[operation]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.with_label_values(&["stored"]).set(count as f64);
}
