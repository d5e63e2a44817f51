//! # Fedi Crypto - Identity and Request Signing
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `keys` | RSA-2048, PKCS#1 / SPKI PEM | Persistent process identity |
//! | `http_signature` | RSASSA-PKCS1-v1_5 + SHA-256 | `Signature` header for outbound GETs |
//!
//! ## Properties
//!
//! - **Keys**: generated once, never overwritten, never rotated
//! - **Signatures**: deterministic padding, byte-for-byte reproducible for a
//!   fixed (request, identity, time) triple

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod http_signature;
pub mod keys;

// Re-exports
pub use errors::CryptoError;
pub use http_signature::{sign_request, RequestTarget, SignedHeaders};
pub use keys::{ensure_identity, public_key_pem, Identity, KeyManager, SignablePublicKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
