//! Profile server: publishes the actor document on every path.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::domain::{ActorDocument, ActorError, ACTIVITY_JSON};

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9004";

/// Build the router. Every method and path answers with the actor document.
pub fn router(actor: Arc<ActorDocument>) -> Router {
    Router::new().fallback(serve_actor).with_state(actor)
}

async fn serve_actor(State(actor): State<Arc<ActorDocument>>, uri: Uri) -> Response {
    info!(path = %uri.path(), "Actor document requested");

    match actor.to_json() {
        Ok(body) => ([(header::CONTENT_TYPE, ACTIVITY_JSON)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode actor document");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// A bound profile server, ready to run.
pub struct ProfileServer {
    listener: TcpListener,
    actor: Arc<ActorDocument>,
}

impl ProfileServer {
    /// Bind the listener. Binding is separate from [`run`](Self::run) so
    /// address conflicts surface before the server task is spawned.
    pub async fn bind(addr: SocketAddr, actor: Arc<ActorDocument>) -> Result<Self, ActorError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ActorError::Bind { addr, source })?;
        Ok(Self { listener, actor })
    }

    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, ActorError> {
        self.listener.local_addr().map_err(ActorError::Serve)
    }

    /// Serve until the task is dropped or the listener fails.
    pub async fn run(self) -> Result<(), ActorError> {
        let addr = self.local_addr()?;
        info!(addr = %addr, actor = %self.actor.id, "Starting profile server");

        axum::serve(self.listener, router(self.actor))
            .await
            .map_err(ActorError::Serve)
    }
}
