//! Signed GET client.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fedi_crypto::http_signature::{sign_target, RequestTarget};
use fedi_crypto::{CryptoError, Identity};
use reqwest::header::{ACCEPT, DATE, HOST};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::domain::FetchResult;

/// Media type requested from peers.
pub const ACTIVITY_JSON: &str = "application/activity+json";

/// Per-request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Errors from a single fetch. All are recoverable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("signing failed: {0}")]
    Signing(#[from] CryptoError),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("reading body failed: {0}")]
    BodyRead(#[source] reqwest::Error),
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Fetches documents with HTTP-signed GET requests.
pub struct FetchPipeline {
    client: Client,
    identity: Arc<Identity>,
    timeout: Duration,
}

impl FetchPipeline {
    /// Create a pipeline that signs as `identity`.
    pub fn new(identity: Arc<Identity>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            identity,
            timeout,
        })
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `uri`, signing with the current time.
    pub async fn fetch(&self, uri: &str) -> Result<FetchResult, FetchError> {
        self.fetch_at(uri, Utc::now()).await
    }

    /// Fetch `uri`, signing with `now` as the `Date`.
    pub async fn fetch_at(&self, uri: &str, now: DateTime<Utc>) -> Result<FetchResult, FetchError> {
        let url = parse_target(uri)?;
        let target = RequestTarget::from_url("GET", &url)?;
        let signed = sign_target(&target, &self.identity, now)?;

        debug!(uri = %url, key_id = %self.identity.key_id(), "Sending signed request");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, ACTIVITY_JSON)
            .header(DATE, &signed.date)
            .header(HOST, &signed.host)
            .header("Signature", &signed.signature)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Transport(e)
            } else {
                FetchError::BodyRead(e)
            }
        })?;

        info!(uri = %url, status, bytes = body.len(), "Fetched document");
        Ok(FetchResult::from_response(status, body.to_vec()))
    }
}

/// Parse and vet a user-supplied URI.
pub fn parse_target(uri: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUri {
        uri: uri.to_string(),
        reason,
    };

    let url = Url::parse(uri).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}
