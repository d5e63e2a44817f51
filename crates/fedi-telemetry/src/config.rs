//! Telemetry configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Default log file. The terminal UI owns stdout, so logs go to disk.
pub const DEFAULT_LOG_FILE: &str = "debug.log";

/// Configuration for the logging stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup record
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error, or a full directive)
    pub log_level: String,

    /// Write to stderr instead of the log file (headless runs)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Log file used when console output is off
    pub log_file: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "fedi-nav".to_string(),
            log_level: "info".to_string(),
            console_output: false,
            json_logs: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FEDI_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `FEDI_CONSOLE_OUTPUT`: Log to stderr (default: false)
    /// - `FEDI_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `FEDI_LOG_FILE`: Log file path (default: debug.log)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            service_name: defaults.service_name,

            log_level: lookup("FEDI_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("FEDI_CONSOLE_OUTPUT")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.console_output),

            json_logs: lookup("FEDI_JSON_LOGS")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.json_logs),

            log_file: lookup("FEDI_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }

    /// Override the log file location.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
