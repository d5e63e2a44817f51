//! Fetch pipeline and the worker that runs it off the event loop.

mod client;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

pub use client::{parse_target, FetchError, FetchPipeline, ACTIVITY_JSON, DEFAULT_TIMEOUT};

use crate::domain::FetchRequest;
use crate::event::AppEvent;

/// Run `request` on its own task and report the outcome as an event.
pub fn spawn_fetch(
    pipeline: Arc<FetchPipeline>,
    request: FetchRequest,
    events: UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = pipeline.fetch(&request.uri).await;
        let event = AppEvent::FetchCompleted {
            generation: request.generation,
            uri: request.uri,
            outcome,
        };
        if events.send(event).is_err() {
            debug!("Event loop gone; dropping fetch result");
        }
    })
}
