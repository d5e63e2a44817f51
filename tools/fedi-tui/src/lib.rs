//! fedi-tui: a terminal navigator for signed ActivityPub documents.
//!
//! ## Architecture
//!
//! ```text
//!   crossterm input ──┐
//!                     ├──► mpsc<AppEvent> ──► App::handle_event ──► Command
//!   fetch workers ────┘                        (NavigationState)      │
//!        ▲                                                             │
//!        └──────────── spawn_fetch(FetchRequest) ◄────────────────────┘
//! ```
//!
//! All state changes happen in [`app::App::handle_event`] on the main loop.
//! Fetches run on their own tasks and report back as events.

pub mod app;
pub mod config;
pub mod domain;
pub mod event;
pub mod fetch;
pub mod ui;

pub use app::{App, Command};
pub use config::Args;
pub use domain::{FetchRequest, FetchResult, NavigationState, Phase};
pub use event::AppEvent;
pub use fetch::{FetchError, FetchPipeline};
