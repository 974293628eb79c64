//! Layered configuration for the `xcctl` client.
//!
//! Values are merged from built-in defaults, an optional TOML configuration
//! file, `XCCTL_*` environment variables, and finally command-line flags,
//! with later layers taking precedence. The binary only hands the loader the
//! configuration flags that precede the subcommand.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_OUTPUT, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_SECS,
    default_log_filter, default_log_filter_string, default_log_format,
    default_output_string, default_poll_interval_ms, default_wait_timeout,
    default_wait_timeout_secs,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Client configuration shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "XCCTL")]
pub struct Config {
    /// Tracing filter expression, for example `xcctl=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Formatter used for diagnostics on stderr.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Output format used when `-o/--output` is absent.
    #[serde(default = "default_output_string")]
    #[ortho_config(default = default_output_string())]
    pub default_output: String,
    /// Seconds `wait` keeps polling before it fails.
    #[serde(default = "default_wait_timeout_secs")]
    #[ortho_config(default = default_wait_timeout_secs())]
    pub wait_timeout_secs: u64,
    /// Milliseconds between `wait` polls.
    #[serde(default = "default_poll_interval_ms")]
    #[ortho_config(default = default_poll_interval_ms())]
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            default_output: default_output_string(),
            wait_timeout_secs: default_wait_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the diagnostics formatter.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the output format name used when `-o` is absent.
    #[must_use]
    pub fn default_output(&self) -> &str {
        &self.default_output
    }

    /// Returns how long `wait` polls before failing.
    #[must_use]
    pub const fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    /// Returns the delay between `wait` polls. A zero interval is raised to
    /// one millisecond so polling cannot spin.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
