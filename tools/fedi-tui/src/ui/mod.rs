//! UI module for TUI rendering.
//!
//! ```text
//! ┌────────┐┌ URI ──────────────────────────────────────┐
//! │  Back  ││https://a.test/actor                        │
//! └────────┘└────────────────────────────────────────────┘
//! ┌ Document ─────────────────────────────────────────────┐
//! │{                                                      │
//! │  "id": "https://a.test/actor",                        │
//! └───────────────────────────────────────────────────────┘
//! Status: fetched: 200
//! ```

pub mod highlight;
pub mod layout;

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::domain::Phase;

pub use layout::AppLayout;

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = app.layout();

    render_back_button(frame, app, layout);
    render_input(frame, app, layout);
    render_document(frame, app, layout);
    render_status(frame, app, layout);
}

fn render_back_button(frame: &mut Frame, app: &App, layout: &AppLayout) {
    let style = if app.nav().depth() >= 2 {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let button = Paragraph::new("Back")
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(button, layout.back_button);
}

fn render_input(frame: &mut Frame, app: &App, layout: &AppLayout) {
    let input = app.nav().input();
    let len = input.chars().count();

    // Keep the end of long URIs visible, leaving a cell for the cursor.
    let visible = usize::from(layout.input.width.saturating_sub(3));
    let text = if input.is_empty() {
        Line::from(Span::styled("Enter URL", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(input.chars().skip(len.saturating_sub(visible)).collect::<String>())
    };

    let paragraph =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" URI "));
    frame.render_widget(paragraph, layout.input);

    let cursor_offset = u16::try_from(len.min(visible)).unwrap_or(u16::MAX);
    frame.set_cursor_position((layout.input.x + 1 + cursor_offset, layout.input.y + 1));
}

fn render_document(frame: &mut Frame, app: &App, layout: &AppLayout) {
    let rows = layout.document_rows();
    let lines: Vec<Line> = match app.nav().current() {
        Some(doc) => doc
            .text
            .lines()
            .skip(app.scroll())
            .take(rows)
            .map(highlight::highlight_line)
            .collect(),
        None => Vec::new(),
    };

    let title = match app.nav().current() {
        Some(doc) => format!(
            " {} [{}/{}] ",
            doc.status,
            app.scroll() + 1,
            doc.line_count().max(1)
        ),
        None => " Document ".to_string(),
    };

    let border_color = match app.nav().phase() {
        Phase::Idle | Phase::Ready => Color::Blue,
        Phase::Fetching => Color::Yellow,
        Phase::Errored => Color::Red,
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(paragraph, layout.document);
}

fn render_status(frame: &mut Frame, app: &App, layout: &AppLayout) {
    let status_color = match app.nav().phase() {
        Phase::Errored => Color::Red,
        Phase::Fetching => Color::Yellow,
        _ => Color::White,
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw("Status: "),
        Span::styled(app.nav().status(), Style::default().fg(status_color)),
    ]));
    frame.render_widget(status, layout.status);
}
