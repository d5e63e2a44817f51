//! # HTTP Signatures (draft-cavage)
//!
//! Produces the `Date`, `Host` and `Signature` headers for an outbound
//! request. The signed component list is fixed:
//!
//! ```text
//! (request-target): get /path?query
//! host: example.test
//! date: Sun, 06 Nov 1994 08:49:37 GMT
//! ```
//!
//! The base string is signed with RSASSA-PKCS1-v1_5 over SHA-256. Output is a
//! pure function of (method, URI, identity, time).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};
use url::Url;

use crate::{CryptoError, Identity};

/// Signature algorithm label.
pub const ALGORITHM: &str = "rsa-sha256";

/// Ordered list of signed components, as advertised in the header.
pub const SIGNED_HEADERS: &str = "(request-target) host date";

/// Method, authority and path of the request being signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// Lower-cased method
    pub method: String,
    /// Authority, `host` or `host:port` for non-default ports
    pub host: String,
    /// Path plus `?query` when present
    pub path_and_query: String,
}

impl RequestTarget {
    /// Derive the signing target from a method and absolute URI.
    pub fn parse(method: &str, uri: &str) -> Result<Self, CryptoError> {
        let url = Url::parse(uri).map_err(|e| CryptoError::Signing(format!("{uri}: {e}")))?;
        Self::from_url(method, &url)
    }

    /// Derive the signing target from an already parsed URL.
    pub fn from_url(method: &str, url: &Url) -> Result<Self, CryptoError> {
        let host = url
            .host_str()
            .ok_or_else(|| CryptoError::Signing(format!("{url}: no host")))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let mut path_and_query = url.path().to_string();
        if let Some(query) = url.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        Ok(Self {
            method: method.to_ascii_lowercase(),
            host,
            path_and_query,
        })
    }

    /// `(request-target)` pseudo-header value.
    pub fn request_target(&self) -> String {
        format!("{} {}", self.method, self.path_and_query)
    }
}

/// Headers to attach to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `Date` value (IMF-fixdate)
    pub date: String,
    /// `Host` value
    pub host: String,
    /// Full `Signature` header value
    pub signature: String,
}

impl SignedHeaders {
    /// Header name/value pairs in signing order.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("Date", self.date.as_str()),
            ("Host", self.host.as_str()),
            ("Signature", self.signature.as_str()),
        ]
    }
}

/// Format a timestamp as an RFC 7231 IMF-fixdate.
pub fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build the newline-joined signature base string.
pub fn signature_base_string(target: &RequestTarget, date: &str) -> String {
    format!(
        "(request-target): {}\nhost: {}\ndate: {}",
        target.request_target(),
        target.host,
        date
    )
}

/// Sign `base` with the identity key, returning padded standard base64.
pub fn sign_base_string(identity: &Identity, base: &str) -> Result<String, CryptoError> {
    let digest = Sha256::digest(base.as_bytes());
    let signature = identity
        .private_key()
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    Ok(STANDARD.encode(signature))
}

/// Sign a request for `uri` at time `now`.
pub fn sign_request(
    method: &str,
    uri: &str,
    identity: &Identity,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, CryptoError> {
    let target = RequestTarget::parse(method, uri)?;
    sign_target(&target, identity, now)
}

/// Sign an already parsed request target.
pub fn sign_target(
    target: &RequestTarget,
    identity: &Identity,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, CryptoError> {
    let date = http_date(now);
    let base = signature_base_string(target, &date);
    let signature = sign_base_string(identity, &base)?;

    Ok(SignedHeaders {
        date,
        host: target.host.clone(),
        signature: format!(
            "keyId=\"{}\",algorithm=\"{ALGORITHM}\",headers=\"{SIGNED_HEADERS}\",signature=\"{signature}\"",
            identity.key_id()
        ),
    })
}
