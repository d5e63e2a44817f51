//! Link discovery on rendered document lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// A complete JSON string literal. Escapes are consumed pairwise so `\"`
/// stays inside the literal.
static JSON_STRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("valid json string regex"));

const HTTPS_PREFIX: &str = "https://";

/// What a document line resolves to when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTarget {
    /// A dereferenceable URI, JSON-unescaped
    Uri(String),
    /// No link; the trimmed line, for echoing in the status bar
    Text(String),
    /// A link-shaped string that is not a valid JSON string literal
    Malformed(String),
}

/// Resolve line `line_index` of `text`. `None` when the index is past the
/// end of the document.
pub fn extract(text: &str, line_index: usize) -> Option<LineTarget> {
    text.lines().nth(line_index).map(classify_line)
}

/// Resolve a single line.
///
/// String literals are scanned left to right and the first one whose
/// decoded value starts with `https://` wins. A URL embedded inside a longer
/// string (escaped HTML in `content`, say) is not a link.
pub fn classify_line(line: &str) -> LineTarget {
    let trimmed = line.trim();

    for found in JSON_STRING_RE.find_iter(trimmed) {
        let literal = found.as_str();
        match serde_json::from_str::<String>(literal) {
            Ok(value) if value.starts_with(HTTPS_PREFIX) => return LineTarget::Uri(value),
            Ok(_) => {}
            Err(e) if literal[1..].starts_with(HTTPS_PREFIX) => {
                return LineTarget::Malformed(e.to_string())
            }
            Err(_) => {}
        }
    }

    LineTarget::Text(trimmed.to_string())
}
