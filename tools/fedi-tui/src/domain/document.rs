//! Fetched documents.

use serde_json::Value;

/// Outcome of a completed GET: status, raw body and display text.
///
/// Non-2xx responses are ordinary results; their bodies are often JSON
/// error documents worth reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// HTTP status code
    pub status: u16,
    /// Body bytes as received
    pub raw: Vec<u8>,
    /// Indented JSON, or the lossy UTF-8 body when it is not JSON
    pub text: String,
    /// Whether `text` came from the JSON pretty-printer
    pub pretty: bool,
}

impl FetchResult {
    /// Build a result from a status code and body.
    pub fn from_response(status: u16, raw: Vec<u8>) -> Self {
        let (text, pretty) = match pretty_json(&raw) {
            Some(text) => (text, true),
            None => (String::from_utf8_lossy(&raw).into_owned(), false),
        };
        Self {
            status,
            raw,
            text,
            pretty,
        }
    }

    /// Number of display lines.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Indent a JSON body with two spaces, keeping key order.
pub fn pretty_json(raw: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(raw).ok()?;
    serde_json::to_string_pretty(&value).ok()
}
