//! Line-level styling for indented JSON.
//!
//! Works on one display line at a time: an optional `"key": ` prefix, a
//! scalar or bracket, and an optional trailing comma. Anything else is
//! shown unstyled.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

fn key_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

fn value_style(value: &str) -> Style {
    if value.starts_with("\"https://") {
        link_style()
    } else if value.starts_with('"') {
        Style::default().fg(Color::Green)
    } else if matches!(value, "true" | "false" | "null") {
        Style::default().fg(Color::Yellow)
    } else if value.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    }
}

/// Byte offset just past the closing quote of a leading `"key"` that is
/// followed by `": "`.
fn key_end(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&b'"') {
        return None;
    }

    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => {
                return rest[i + 1..].starts_with(": ").then_some(i + 1);
            }
            _ => i += 1,
        }
    }
    None
}

/// Style one line of the document pane.
pub fn highlight_line(line: &str) -> Line<'_> {
    let rest = line.trim_start();
    let (indent, rest) = line.split_at(line.len() - rest.len());

    let mut spans = Vec::with_capacity(5);
    if !indent.is_empty() {
        spans.push(Span::raw(indent));
    }

    let value = match key_end(rest) {
        Some(end) => {
            spans.push(Span::styled(&rest[..end], key_style()));
            spans.push(Span::raw(": "));
            &rest[end + 2..]
        }
        None => rest,
    };

    let (value, trailer) = match value.strip_suffix(',') {
        Some(stripped) => (stripped, ","),
        None => (value, ""),
    };

    if !value.is_empty() {
        spans.push(Span::styled(value, value_style(value)));
    }
    if !trailer.is_empty() {
        spans.push(Span::raw(trailer));
    }

    Line::from(spans)
}
