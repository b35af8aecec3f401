use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format (`json` or text).
pub const LOG_FORMAT_ENV: &str = "DBSWEEP_LOG_FORMAT";

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"inspector::run_cleanup"`).
/// * `elapsed` - Duration the command execution took.
/// * `success` - Whether the command completed successfully.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Whether `DBSWEEP_LOG_FORMAT` asks for JSON output.
pub fn json_requested() -> bool {
    std::env::var(LOG_FORMAT_ENV).is_ok_and(|value| value.eq_ignore_ascii_case("json"))
}

/// Install the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays machine-readable.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(verbose: bool, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
