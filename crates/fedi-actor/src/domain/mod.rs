//! Domain types for actor publication.

pub mod actor;
pub mod error;

pub use actor::{ActorDocument, PublicKeyDocument, ACTIVITY_JSON, ACTIVITY_STREAMS_CONTEXT};
pub use error::ActorError;
