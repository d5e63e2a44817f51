//! # Fedi Telemetry
//!
//! Structured logging for fedi-nav, built on `tracing-subscriber`.
//!
//! The interactive client draws on the terminal, so log records go to a file
//! (`debug.log` unless configured otherwise). Headless runs can route them to
//! stderr with `FEDI_CONSOLE_OUTPUT=1`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fedi_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! tracing::info!("ready");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FEDI_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `FEDI_CONSOLE_OUTPUT` | `false` | Log to stderr instead of the file |
//! | `FEDI_JSON_LOGS` | `false` | JSON formatted records |
//! | `FEDI_LOG_FILE` | `debug.log` | Log file path |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_LOG_FILE};
pub use logging::{build_filter, init_logging, open_log_file};

use std::path::PathBuf;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log file could not be opened
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        /// Requested log file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid filter directive or other configuration problem
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A global subscriber was already installed
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}
