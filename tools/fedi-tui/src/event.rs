//! Events consumed by the main loop.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, MouseEvent};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::domain::FetchResult;
use crate::fetch::FetchError;

/// How long the input reader waits before checking whether the loop is gone.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// Key press
    Key(KeyEvent),
    /// Mouse click, scroll or move
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
    /// A fetch finished
    FetchCompleted {
        generation: u64,
        uri: String,
        outcome: Result<FetchResult, FetchError>,
    },
}

impl AppEvent {
    /// Map a terminal event. Focus and paste events are dropped.
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(AppEvent::Key(key)),
            Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
            Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
            _ => None,
        }
    }
}

/// Read terminal input on a dedicated thread and forward it as events.
///
/// The thread exits once the receiving side is dropped.
pub fn spawn_input_reader(events: UnboundedSender<AppEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("terminal-input".to_string())
        .spawn(move || {
            while !events.is_closed() {
                match event::poll(POLL_INTERVAL) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(e) => {
                        warn!(error = %e, "Terminal poll failed");
                        break;
                    }
                }

                let terminal_event = match event::read() {
                    Ok(ev) => ev,
                    Err(e) => {
                        warn!(error = %e, "Terminal read failed");
                        break;
                    }
                };

                if let Some(app_event) = AppEvent::from_terminal(terminal_event) {
                    if events.send(app_event).is_err() {
                        break;
                    }
                }
            }
            debug!("Input reader stopped");
        })
}
