//! Shared fixtures: a recording HTTP server and a fixed identity.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use fedi_crypto::{ensure_identity, CryptoError, Identity};
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 2048-bit fixture key shared with the fedi-crypto unit tests.
pub const FIXTURE_KEY_PEM: &str =
    include_str!("../../../crates/fedi-crypto/testdata/rsa_2048.pem");

/// Actor id used as key owner throughout the suite.
pub const TEST_OWNER: &str = "https://local.test/alice";

/// Load the fixture key as `owner` through the regular key manager.
pub fn fixture_identity(owner: &str) -> Result<Arc<Identity>, CryptoError> {
    let dir = tempfile::tempdir().map_err(|source| CryptoError::KeyIo {
        path: std::env::temp_dir(),
        source,
    })?;
    let path = dir.path().join("private_key.pem");
    std::fs::write(&path, FIXTURE_KEY_PEM).map_err(|source| CryptoError::KeyIo {
        path: path.clone(),
        source,
    })?;
    ensure_identity(path, owner).map(Arc::new)
}

/// One request as the fixture server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RecordedRequest {
    /// Header value as a string, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parameters of the `Signature` header (`keyId`, `algorithm`, ...).
    pub fn signature_params(&self) -> HashMap<String, String> {
        self.header("signature")
            .unwrap_or_default()
            .split(',')
            .filter_map(|part| part.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.trim_matches('"').to_string()))
            .collect()
    }

    /// Rebuild the signature base string from what actually arrived.
    pub fn base_string(&self) -> String {
        let path_and_query = self
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        format!(
            "(request-target): {} {}\nhost: {}\ndate: {}",
            self.method.as_str().to_ascii_lowercase(),
            path_and_query,
            self.header("host").unwrap_or_default(),
            self.header("date").unwrap_or_default(),
        )
    }

    /// Check the `Signature` header against `key` over `base`.
    pub fn verify_base(&self, key: &RsaPublicKey, base: &str) -> Result<(), String> {
        let params = self.signature_params();
        let encoded = params.get("signature").ok_or("no signature parameter")?;
        let signature = STANDARD.decode(encoded).map_err(|e| e.to_string())?;
        let digest = Sha256::digest(base.as_bytes());
        key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
            .map_err(|e| e.to_string())
    }

    /// Verify the request as a receiving server would.
    pub fn verify(&self, key: &RsaPublicKey) -> Result<(), String> {
        self.verify_base(key, &self.base_string())
    }
}

#[derive(Clone)]
struct FixtureState {
    routes: Arc<HashMap<String, (StatusCode, String)>>,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Serves canned bodies by path and records every request.
///
/// Unknown paths answer 404 with a small JSON error document.
pub struct FixtureServer {
    addr: SocketAddr,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl FixtureServer {
    /// Bind an ephemeral loopback port and start serving `routes`.
    pub async fn start(routes: &[(&str, u16, &str)]) -> std::io::Result<Self> {
        let routes: HashMap<String, (StatusCode, String)> = routes
            .iter()
            .map(|(path, status, body)| {
                let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::OK);
                (path.to_string(), (status, body.to_string()))
            })
            .collect();
        let log = Arc::new(Mutex::new(Vec::new()));
        let state = FixtureState {
            routes: Arc::new(routes),
            log: Arc::clone(&log),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = Router::new().fallback(record).with_state(state);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, log, handle })
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// `host:port` as it appears in the `Host` header.
    pub fn authority(&self) -> String {
        self.addr.to_string()
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<FixtureState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Ok(mut log) = state.log.lock() {
        log.push(RecordedRequest {
            method,
            uri: uri.clone(),
            headers,
        });
    }

    let (status, body) = state.routes.get(uri.path()).cloned().unwrap_or((
        StatusCode::NOT_FOUND,
        r#"{"error":"Record not found"}"#.to_string(),
    ));
    (status, [(CONTENT_TYPE, "application/activity+json")], body)
}
