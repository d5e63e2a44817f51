//! Screen regions, shared by rendering and mouse hit-testing.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

/// Height of the Back button / URI input row.
pub const HEADER_HEIGHT: u16 = 3;

/// Width of the Back button.
pub const BACK_BUTTON_WIDTH: u16 = 10;

/// Height of the status line.
pub const STATUS_HEIGHT: u16 = 1;

/// Screen regions for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub back_button: Rect,
    pub input: Rect,
    pub document: Rect,
    /// Inside of the document border; one row per line
    pub document_content: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Split `area` into header, document pane and status line.
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Back + URI
                Constraint::Min(0),                // Document
                Constraint::Length(STATUS_HEIGHT), // Status
            ])
            .split(area);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(BACK_BUTTON_WIDTH), Constraint::Min(0)])
            .split(rows[0]);

        let document = rows[1];
        let document_content = Block::default().borders(Borders::ALL).inner(document);

        Self {
            back_button: header[0],
            input: header[1],
            document,
            document_content,
            status: rows[2],
        }
    }

    /// Whether (column, row) hits the Back button.
    pub fn is_back_button(&self, column: u16, row: u16) -> bool {
        point_in_rect(column, row, self.back_button)
    }

    /// Document line under (column, row), given the current scroll offset.
    pub fn document_line_at(&self, column: u16, row: u16, scroll: usize) -> Option<usize> {
        if !point_in_rect(column, row, self.document_content) {
            return None;
        }
        Some(usize::from(row - self.document_content.y) + scroll)
    }

    /// Visible document rows.
    pub fn document_rows(&self) -> usize {
        usize::from(self.document_content.height)
    }
}

fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
