use std::time::Duration;

use hrcal_domain::HrCalError;
use tracing::{info, warn};

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a logical identifier such as `"calendar::get_month_view"`.
/// Failed commands also carry the error label.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&HrCalError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "command_execution_failure"
        ),
    }
}

/// Convert an `HrCalError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &HrCalError) -> &'static str {
    error.label()
}
