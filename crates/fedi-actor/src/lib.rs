//! # Fedi Actor - Profile Publication
//!
//! Builds the local ActivityPub `Person` document and serves it over HTTP so
//! that remote servers can dereference the `keyId` carried by our request
//! signatures.
//!
//! ```text
//!   ANY /<anything>  ──►  200 application/activity+json  { "@context": ..., "publicKey": ... }
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use fedi_actor::{ActorDocument, ProfileServer};
//!
//! let actor = Arc::new(ActorDocument::from_identity(&identity, "alice", "Alice")?);
//! let server = ProfileServer::bind("0.0.0.0:9004".parse()?, actor).await?;
//! tokio::spawn(server.run());
//! ```

#![warn(missing_docs)]

pub mod domain;
pub mod service;

pub use domain::{ActorDocument, ActorError, PublicKeyDocument, ACTIVITY_JSON};
pub use service::{router, ProfileServer, DEFAULT_LISTEN_ADDR};
