//! Actor publication errors.

use std::net::SocketAddr;

use fedi_crypto::CryptoError;
use thiserror::Error;

/// Errors building or serving the actor document.
#[derive(Debug, Error)]
pub enum ActorError {
    /// Public key material could not be derived
    #[error("Actor key unavailable: {0}")]
    Key(#[from] CryptoError),

    /// Serialization failed
    #[error("Actor encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Listener could not be bound
    #[error("Failed to bind profile server on {addr}: {source}")]
    Bind {
        /// Requested address
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Server loop terminated with an error
    #[error("Profile server failed: {0}")]
    Serve(#[source] std::io::Error),
}
