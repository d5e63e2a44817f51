//! Navigation engine.
//!
//! A pure state machine over `{Idle, Fetching, Ready, Errored}`. It performs
//! no I/O: operations that need the network return a [`FetchRequest`] for the
//! caller to execute, and the outcome comes back through
//! [`NavigationState::complete`].
//!
//! Every request carries a generation number. Any navigation bumps the
//! generation, so a completion for a superseded request is recognised and
//! dropped instead of overwriting newer state.
//!
//! Each history entry caches the last document fetched for it. Going back to
//! an entry with a cached document restores it without a request; entries
//! that never completed are fetched again.

use std::fmt::Display;

use super::document::FetchResult;
use super::links::{self, LineTarget};

/// Status shown before anything has happened.
pub const INITIAL_STATUS: &str = "init";

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request for the history tip is outstanding
    Fetching,
    /// The current document belongs to the history tip
    Ready,
    /// The last request for the tip failed
    Errored,
}

/// One visited URI and its last fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Visited URI
    pub uri: String,
    /// Document from the last completed fetch of `uri`
    pub document: Option<FetchResult>,
}

/// A fetch the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Generation to echo back on completion
    pub generation: u64,
    /// Target URI
    pub uri: String,
}

/// Navigation state: history stack, current document, status line and
/// input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    history: Vec<HistoryEntry>,
    current: Option<FetchResult>,
    status: String,
    phase: Phase,
    input: String,
    generation: u64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Empty history, status `init`.
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            current: None,
            status: INITIAL_STATUS.to_string(),
            phase: Phase::Idle,
            input: String::new(),
            generation: 0,
        }
    }

    // === Accessors ===

    /// Visited URIs, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|entry| entry.uri.as_str())
    }

    /// Number of history entries.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Most recent history entry.
    pub fn tip(&self) -> Option<&str> {
        self.history.last().map(|entry| entry.uri.as_str())
    }

    /// Document on display.
    pub fn current(&self) -> Option<&FetchResult> {
        self.current.as_ref()
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// URI input line.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Generation of the newest request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    // === Input line ===

    /// Append a character to the input line.
    pub fn input_push(&mut self, c: char) {
        self.input.push(c);
    }

    /// Delete the last character of the input line.
    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Clear the input line.
    pub fn input_clear(&mut self) {
        self.input.clear();
    }

    // === Transitions ===

    /// Navigate to the input line's URI. Blank input is ignored.
    pub fn submit(&mut self) -> Option<FetchRequest> {
        let uri = self.input.trim().to_string();
        let request = self.navigate(&uri)?;
        self.status = "fetching".to_string();
        Some(request)
    }

    /// Navigate forward to `uri`.
    ///
    /// Returns `None` without touching any state when `uri` is blank or
    /// already the history tip.
    pub fn navigate(&mut self, uri: &str) -> Option<FetchRequest> {
        let uri = uri.trim();
        if uri.is_empty() || self.tip() == Some(uri) {
            return None;
        }

        self.history.push(HistoryEntry {
            uri: uri.to_string(),
            document: None,
        });
        self.input = uri.to_string();
        Some(self.begin_fetch(uri.to_string()))
    }

    /// Pop the history tip.
    ///
    /// With fewer than two entries this is a no-op and leaves the state
    /// untouched. Otherwise the new tip's cached document is restored, or a
    /// fetch is requested if it has none.
    pub fn back(&mut self) -> Option<FetchRequest> {
        if self.history.len() < 2 {
            return None;
        }

        self.history.pop();
        let tip = self.history.last()?.clone();
        self.input = tip.uri.clone();
        self.status = "back".to_string();

        match tip.document {
            Some(document) => {
                // Invalidate anything still in flight for the popped entry.
                self.generation += 1;
                self.current = Some(document);
                self.phase = Phase::Ready;
                None
            }
            None => Some(self.begin_fetch(tip.uri)),
        }
    }

    /// Act on a click on line `line_index` of the current document.
    ///
    /// Links are followed; other lines are echoed to the status line. Lines
    /// past the end of the document are ignored.
    pub fn follow_line(&mut self, line_index: usize) -> Option<FetchRequest> {
        let text = self.current.as_ref().map(|doc| doc.text.as_str())?;

        match links::extract(text, line_index)? {
            LineTarget::Uri(uri) => {
                self.status = uri.clone();
                self.navigate(&uri)
            }
            LineTarget::Text(line) => {
                self.status = line;
                None
            }
            LineTarget::Malformed(err) => {
                self.status = format!("Error: {err}");
                None
            }
        }
    }

    /// Apply a fetch outcome.
    ///
    /// Returns `false` and changes nothing when `generation` is not the
    /// newest; the result belongs to a navigation that was superseded.
    pub fn complete<E: Display>(
        &mut self,
        generation: u64,
        outcome: Result<FetchResult, E>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }

        match outcome {
            Ok(result) => {
                self.status = format!("fetched: {}", result.status);
                if let Some(tip) = self.history.last_mut() {
                    tip.document = Some(result.clone());
                }
                self.current = Some(result);
                self.phase = Phase::Ready;
            }
            Err(e) => {
                self.status = format!("error: {e}");
                self.phase = Phase::Errored;
            }
        }
        true
    }

    fn begin_fetch(&mut self, uri: String) -> FetchRequest {
        self.generation += 1;
        self.phase = Phase::Fetching;
        FetchRequest {
            generation: self.generation,
            uri,
        }
    }
}
