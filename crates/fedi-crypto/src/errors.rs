//! Crypto error types.

use std::path::PathBuf;

use thiserror::Error;

/// Identity and signing errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key generation failed (RNG or prime search)
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Reading or writing key material failed
    #[error("Key I/O failed for {path}: {source}")]
    KeyIo {
        /// File the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Persisted key material could not be parsed
    #[error("Malformed key material in {path}: {reason}")]
    KeyParse {
        /// File the material was read from
        path: PathBuf,
        /// Parser diagnostic
        reason: String,
    },

    /// Public key serialization failed
    #[error("Public key encoding failed: {0}")]
    KeyEncoding(String),

    /// Request could not be signed
    #[error("Signing failed: {0}")]
    Signing(String),
}

impl CryptoError {
    /// Whether the error can only happen at startup (no identity available).
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CryptoError::Signing(_))
    }
}
