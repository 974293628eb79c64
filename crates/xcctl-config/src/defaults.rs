//! Built-in configuration defaults, used before any file, environment, or
//! flag layer applies.

use std::time::Duration;

use crate::logging::LogFormat;

/// Default log filter expression. Diagnostics stay quiet unless asked for
/// because stdout carries command output and stderr carries errors.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Output format used when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "table";

/// Seconds `wait` polls before giving up.
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 30;

/// Milliseconds between two `wait` polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default log filter expression used by the client.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the client.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned default output format name.
#[must_use]
pub fn default_output_string() -> String {
    DEFAULT_OUTPUT.to_owned()
}

/// Default `wait` timeout in seconds.
#[must_use]
pub const fn default_wait_timeout_secs() -> u64 {
    DEFAULT_WAIT_TIMEOUT_SECS
}

/// Default `wait` poll interval in milliseconds.
#[must_use]
pub const fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

/// Default `wait` timeout as a [`Duration`].
#[must_use]
pub const fn default_wait_timeout() -> Duration {
    Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS)
}
