//! # Signed Fetch Flows
//!
//! Drives `FetchPipeline` against the recording fixture server and checks
//! the request exactly as a remote ActivityPub server would receive it:
//!
//! 1. `Accept`, `Date`, `Host` and `Signature` are present and well formed
//! 2. The signature verifies under the identity's public key over the base
//!    string rebuilt from the received headers
//! 3. Error statuses come back as documents, not failures

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use fedi_crypto::sign_request;
    use fedi_tui::{FetchError, FetchPipeline};

    use crate::integration::support::{fixture_identity, FixtureServer, TEST_OWNER};

    const ACTOR_JSON: &str = r#"{"id":"https://remote.test/bob","type":"Person","outbox":"https://remote.test/bob/outbox"}"#;

    fn pipeline() -> (Arc<fedi_crypto::Identity>, FetchPipeline) {
        let identity = fixture_identity(TEST_OWNER).unwrap();
        let pipeline = FetchPipeline::new(Arc::clone(&identity), Duration::from_secs(3)).unwrap();
        (identity, pipeline)
    }

    // =========================================================================
    // HEADERS ON THE WIRE
    // =========================================================================

    #[tokio::test]
    async fn test_signed_get_headers_as_received() {
        let server = FixtureServer::start(&[("/bob", 200, ACTOR_JSON)])
            .await
            .unwrap();
        let (_, pipeline) = pipeline();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let result = pipeline.fetch_at(&server.url("/bob"), now).await.unwrap();
        assert_eq!(result.status, 200);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        assert_eq!(request.method, "GET");
        assert_eq!(request.uri.path(), "/bob");
        assert_eq!(request.header("accept"), Some("application/activity+json"));
        assert_eq!(request.header("date"), Some("Tue, 02 Jan 2024 03:04:05 GMT"));
        assert_eq!(request.header("host"), Some(server.authority().as_str()));

        let params = request.signature_params();
        assert_eq!(params["keyId"], "https://local.test/alice#main-key");
        assert_eq!(params["algorithm"], "rsa-sha256");
        assert_eq!(params["headers"], "(request-target) host date");
        assert!(!params["signature"].is_empty());
    }

    #[tokio::test]
    async fn test_signature_verifies_over_received_headers() {
        let server = FixtureServer::start(&[("/bob", 200, ACTOR_JSON)])
            .await
            .unwrap();
        let (identity, pipeline) = pipeline();

        pipeline.fetch(&server.url("/bob")).await.unwrap();

        let request = &server.requests()[0];
        request.verify(&identity.public_key()).unwrap();
    }

    #[tokio::test]
    async fn test_query_string_is_signed() {
        let server = FixtureServer::start(&[("/bob/outbox", 200, "{}")])
            .await
            .unwrap();
        let (identity, pipeline) = pipeline();

        pipeline
            .fetch(&server.url("/bob/outbox?page=true&min_id=0"))
            .await
            .unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.uri.query(), Some("page=true&min_id=0"));
        request.verify(&identity.public_key()).unwrap();

        // Dropping the query from the target must break verification.
        let without_query = request.base_string().replace("?page=true&min_id=0", "");
        assert!(request
            .verify_base(&identity.public_key(), &without_query)
            .is_err());
    }

    #[tokio::test]
    async fn test_wire_signature_matches_offline_signing() {
        let server = FixtureServer::start(&[("/bob", 200, ACTOR_JSON)])
            .await
            .unwrap();
        let (identity, pipeline) = pipeline();
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
        let uri = server.url("/bob");

        pipeline.fetch_at(&uri, now).await.unwrap();
        let expected = sign_request("GET", &uri, &identity, now).unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.header("signature"), Some(expected.signature.as_str()));
        assert_eq!(request.header("date"), Some(expected.date.as_str()));
    }

    // =========================================================================
    // RESPONSES
    // =========================================================================

    #[tokio::test]
    async fn test_not_found_is_a_document() {
        let server = FixtureServer::start(&[]).await.unwrap();
        let (_, pipeline) = pipeline();

        let result = pipeline.fetch(&server.url("/missing")).await.unwrap();

        assert_eq!(result.status, 404);
        assert!(!result.is_success());
        assert!(result.pretty);
        assert_eq!(result.text, "{\n  \"error\": \"Record not found\"\n}");
    }

    #[tokio::test]
    async fn test_non_json_body_is_kept_verbatim() {
        let server = FixtureServer::start(&[("/plain", 200, "hello\nworld")])
            .await
            .unwrap();
        let (_, pipeline) = pipeline();

        let result = pipeline.fetch(&server.url("/plain")).await.unwrap();

        assert!(!result.pretty);
        assert_eq!(result.text, "hello\nworld");
        assert_eq!(result.raw, b"hello\nworld");
        assert_eq!(result.line_count(), 2);
    }

    #[tokio::test]
    async fn test_unsupported_scheme_never_hits_the_network() {
        let server = FixtureServer::start(&[]).await.unwrap();
        let (_, pipeline) = pipeline();
        let uri = server.url("/bob").replacen("http", "ftp", 1);

        let err = pipeline.fetch(&uri).await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidUri { .. }));
        assert!(server.requests().is_empty());
    }
}
