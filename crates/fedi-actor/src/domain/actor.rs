//! ActivityPub actor document.

use fedi_crypto::{Identity, SignablePublicKey};
use serde::{Deserialize, Serialize};

use super::error::ActorError;

/// JSON-LD context advertised by the actor.
pub const ACTIVITY_STREAMS_CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

/// Media type of ActivityPub documents.
pub const ACTIVITY_JSON: &str = "application/activity+json";

/// Public key block embedded in the actor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyDocument {
    /// Key id, `{owner}#main-key`
    pub id: String,
    /// Owning actor
    pub owner: String,
    /// SPKI PEM
    pub public_key_pem: String,
}

impl From<SignablePublicKey> for PublicKeyDocument {
    fn from(key: SignablePublicKey) -> Self {
        Self {
            id: key.id,
            owner: key.owner,
            public_key_pem: key.public_key_pem,
        }
    }
}

/// The local `Person` actor, published by the profile server so that peers
/// can resolve the `keyId` of our signatures.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDocument {
    /// JSON-LD context
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Always `Person`
    #[serde(rename = "type")]
    pub kind: String,
    /// Actor id (the root URI)
    pub id: String,
    /// Handle
    pub preferred_username: String,
    /// Display name
    pub name: String,
    /// `{root}/inbox`
    pub inbox: String,
    /// `{root}/outbox`
    pub outbox: String,
    /// `{root}/followers`
    pub followers: String,
    /// Key used to verify our request signatures
    pub public_key: PublicKeyDocument,
}

impl ActorDocument {
    /// Build the document for `root_uri` around an already derived key.
    pub fn new(
        root_uri: &str,
        preferred_username: impl Into<String>,
        name: impl Into<String>,
        public_key: SignablePublicKey,
    ) -> Self {
        Self {
            context: vec![ACTIVITY_STREAMS_CONTEXT.to_string()],
            kind: "Person".to_string(),
            id: root_uri.to_string(),
            preferred_username: preferred_username.into(),
            name: name.into(),
            inbox: format!("{root_uri}/inbox"),
            outbox: format!("{root_uri}/outbox"),
            followers: format!("{root_uri}/followers"),
            public_key: public_key.into(),
        }
    }

    /// Build the document for the identity's owner.
    pub fn from_identity(
        identity: &Identity,
        preferred_username: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ActorError> {
        let public_key = identity.signable_public_key()?;
        Ok(Self::new(
            identity.owner(),
            preferred_username,
            name,
            public_key,
        ))
    }

    /// Serialized form served to peers.
    pub fn to_json(&self) -> Result<String, ActorError> {
        Ok(serde_json::to_string(self)?)
    }
}
