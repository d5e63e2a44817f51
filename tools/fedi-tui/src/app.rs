//! Application state and event dispatch.
//!
//! [`App::handle_event`] is the single place where state changes. It owns
//! the [`NavigationState`] plus view-only state (layout, scroll offset) and
//! turns every [`AppEvent`] into at most one [`Command`] for the main loop.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::domain::{FetchRequest, FetchResult, NavigationState};
use crate::event::AppEvent;
use crate::fetch::FetchError;
use crate::ui::AppLayout;

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: isize = 3;

/// Work the main loop must do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a fetch and report back with `AppEvent::FetchCompleted`
    Fetch(FetchRequest),
    /// Leave the event loop
    Quit,
}

/// Application state.
pub struct App {
    nav: NavigationState,
    layout: AppLayout,
    scroll: usize,
}

impl App {
    /// Create the app for a terminal of the given size.
    pub fn new(area: Rect) -> Self {
        Self {
            nav: NavigationState::new(),
            layout: AppLayout::new(area),
            scroll: 0,
        }
    }

    /// Navigation state.
    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    /// Mutable navigation state.
    pub fn nav_mut(&mut self) -> &mut NavigationState {
        &mut self.nav
    }

    /// Current screen regions.
    pub fn layout(&self) -> &AppLayout {
        &self.layout
    }

    /// First visible document line.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Navigate to `uri` as if it had been typed and submitted.
    pub fn navigate(&mut self, uri: &str) -> Option<Command> {
        self.nav.input_clear();
        uri.chars().for_each(|c| self.nav.input_push(c));
        self.nav.submit().map(Command::Fetch)
    }

    /// Dispatch one event.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Mouse(mouse) => self.on_mouse(mouse),
            AppEvent::Resize(cols, rows) => {
                self.on_resize(cols, rows);
                None
            }
            AppEvent::FetchCompleted {
                generation,
                uri,
                outcome,
            } => {
                self.on_fetch_completed(generation, &uri, outcome);
                None
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if ctrl => Some(Command::Quit),
            KeyCode::Enter => self.nav.submit().map(Command::Fetch),
            KeyCode::Backspace => {
                self.nav.input_backspace();
                None
            }
            KeyCode::Char('u') if ctrl => {
                self.nav.input_clear();
                None
            }
            KeyCode::Char(c) if !ctrl => {
                self.nav.input_push(c);
                None
            }
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(self.page() as isize)),
            KeyCode::PageDown => self.scroll_by(self.page() as isize),
            KeyCode::Home => {
                self.scroll = 0;
                None
            }
            KeyCode::End => {
                self.scroll = self.max_scroll();
                None
            }
            _ => None,
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> Option<Command> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.layout.is_back_button(mouse.column, mouse.row) {
                    let before = self.nav.generation();
                    let request = self.nav.back();
                    if self.nav.generation() != before {
                        self.scroll = 0;
                    }
                    return request.map(Command::Fetch);
                }

                let line = self
                    .layout
                    .document_line_at(mouse.column, mouse.row, self.scroll)?;
                self.nav.follow_line(line).map(Command::Fetch)
            }
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            _ => None,
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.layout = AppLayout::new(Rect::new(0, 0, cols, rows));
        self.scroll = self.scroll.min(self.max_scroll());
        self.nav.set_status("size");
    }

    fn on_fetch_completed(
        &mut self,
        generation: u64,
        uri: &str,
        outcome: Result<FetchResult, FetchError>,
    ) {
        match &outcome {
            Ok(result) => info!(uri, generation, status = result.status, "Fetch completed"),
            Err(e) => warn!(uri, generation, error = %e, "Fetch failed"),
        }

        if self.nav.complete(generation, outcome) {
            self.scroll = 0;
        } else {
            debug!(
                uri,
                generation,
                latest = self.nav.generation(),
                "Discarding superseded fetch result"
            );
        }
    }

    fn scroll_by(&mut self, delta: isize) -> Option<Command> {
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());
        None
    }

    fn page(&self) -> usize {
        self.layout.document_rows().max(1)
    }

    fn max_scroll(&self) -> usize {
        let lines = self.nav.current().map_or(0, FetchResult::line_count);
        lines.saturating_sub(self.layout.document_rows())
    }
}
