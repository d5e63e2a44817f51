//! # Profile Publication
//!
//! A peer that receives one of our signed requests resolves `keyId` to the
//! actor document served by `ProfileServer` and verifies with the PEM it
//! finds there. These flows play the peer.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use fedi_actor::{ActorDocument, ProfileServer};
    use fedi_crypto::public_key_pem;
    use fedi_tui::FetchPipeline;
    use rsa::pkcs8::DecodePublicKey;
    use rsa::RsaPublicKey;
    use serde_json::Value;

    use crate::integration::support::{fixture_identity, FixtureServer, TEST_OWNER};

    async fn start_profile_server(actor: ActorDocument) -> String {
        let server = ProfileServer::bind("127.0.0.1:0".parse().unwrap(), Arc::new(actor))
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.run());
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_actor_document_fetched_through_pipeline() {
        let identity = fixture_identity(TEST_OWNER).unwrap();
        let actor = ActorDocument::from_identity(&identity, "alice", "Alice").unwrap();
        let base = start_profile_server(actor).await;
        let pipeline = FetchPipeline::new(Arc::clone(&identity), Duration::from_secs(3)).unwrap();

        let result = pipeline.fetch(&format!("{base}/users/alice")).await.unwrap();

        assert_eq!(result.status, 200);
        let json: Value = serde_json::from_slice(&result.raw).unwrap();
        assert_eq!(json["type"], "Person");
        assert_eq!(json["id"], TEST_OWNER);
        assert_eq!(json["preferredUsername"], "alice");
        assert_eq!(json["outbox"], "https://local.test/alice/outbox");
        assert_eq!(json["publicKey"]["id"], identity.key_id());
        assert_eq!(
            json["publicKey"]["publicKeyPem"],
            public_key_pem(&identity).unwrap().as_str()
        );
    }

    #[tokio::test]
    async fn test_published_key_verifies_our_requests() {
        let identity = fixture_identity(TEST_OWNER).unwrap();
        let actor = ActorDocument::from_identity(&identity, "alice", "Alice").unwrap();
        let base = start_profile_server(actor).await;
        let pipeline = FetchPipeline::new(Arc::clone(&identity), Duration::from_secs(3)).unwrap();

        // A signed request lands on some remote server...
        let remote = FixtureServer::start(&[("/inbox", 200, "{}")]).await.unwrap();
        pipeline.fetch(&remote.url("/inbox")).await.unwrap();
        let request = &remote.requests()[0];

        // ...which resolves keyId through our profile server.
        let key_id = request.signature_params()["keyId"].clone();
        assert_eq!(key_id, identity.key_id());
        let profile = pipeline.fetch(&base).await.unwrap();
        let json: Value = serde_json::from_slice(&profile.raw).unwrap();
        assert_eq!(json["publicKey"]["id"], key_id.as_str());

        let pem = json["publicKey"]["publicKeyPem"].as_str().unwrap();
        let key = RsaPublicKey::from_public_key_pem(pem).unwrap();
        request.verify(&key).unwrap();
    }

    #[tokio::test]
    async fn test_empty_profile_still_serves() {
        let identity = fixture_identity("").unwrap();
        let actor = ActorDocument::from_identity(&identity, "", "").unwrap();
        let base = start_profile_server(actor).await;
        let pipeline = FetchPipeline::new(Arc::clone(&identity), Duration::from_secs(3)).unwrap();

        let result = pipeline.fetch(&base).await.unwrap();

        let json: Value = serde_json::from_slice(&result.raw).unwrap();
        assert_eq!(json["publicKey"]["id"], "#main-key");
        assert_eq!(json["inbox"], "/inbox");
    }
}
