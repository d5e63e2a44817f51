//! Command-line arguments.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fedi_actor::DEFAULT_LISTEN_ADDR;
use fedi_crypto::keys::DEFAULT_KEY_FILE;
use fedi_telemetry::DEFAULT_LOG_FILE;

/// Signed ActivityPub document navigator
#[derive(Parser, Debug, Clone)]
#[command(name = "fedi-tui")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Actor id published by the profile server and used as the key owner
    #[arg(long, env = "FEDI_ROOT_URI", default_value = "")]
    pub root_uri: String,

    /// preferredUsername of the published actor
    #[arg(long, env = "FEDI_PREFERRED_USERNAME", default_value = "")]
    pub preferred_username: String,

    /// Display name of the published actor
    #[arg(long, env = "FEDI_NAME", default_value = "")]
    pub name: String,

    /// Private key file; generated on first run
    #[arg(long, env = "FEDI_KEY_PATH", default_value = DEFAULT_KEY_FILE)]
    pub key_path: PathBuf,

    /// Profile server listen address
    #[arg(long, env = "FEDI_LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "FEDI_TIMEOUT_MS", default_value_t = 3000)]
    pub timeout_ms: u64,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, env = "FEDI_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Do not start the profile server
    #[arg(long)]
    pub no_server: bool,

    /// URI to open on launch
    #[arg(long, env = "FEDI_START_URI")]
    pub start_uri: Option<String>,
}

impl Args {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
