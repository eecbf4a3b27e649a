// Reachability tests - check_reachable against a mock OpenAI-compatible server
//
// Every failure must come back as a categorised ProbeResult, never a panic
// or an Err bubbling out of the probe.

use lmbridge_core::{FailureKind, InferenceServerProbe, ServerEndpoint};
use lmbridge_tests::{MockServer, Reply, closed_port, models_body};
use serde_json::json;
use std::time::{Duration, Instant};

fn probe() -> InferenceServerProbe {
    InferenceServerProbe::new().with_reachability_timeout(Duration::from_millis(500))
}

// ============================================================================
// Reachable servers
// ============================================================================

#[tokio::test]
async fn lists_models_in_server_order() {
    let server = MockServer::with_models(&["qwen2.5-7b-instruct", "llama-3.2-3b-instruct"], "OK").await;

    let result = probe().check_reachable(&server.endpoint()).await;

    assert!(result.is_reachable());
    assert!(result.error().is_none());
    let ids: Vec<_> = result.model_ids().collect();
    assert_eq!(ids, ["qwen2.5-7b-instruct", "llama-3.2-3b-instruct"]);
    assert_eq!(server.model_hits(), 1);
}

#[tokio::test]
async fn empty_listing_is_reachable_without_models() {
    let server = MockServer::with_models(&[], "OK").await;

    let result = probe().check_reachable(&server.endpoint()).await;

    assert!(result.is_reachable());
    assert!(!result.has_models());
    assert!(result.models().is_empty());
}

#[tokio::test]
async fn duplicate_ids_are_kept() {
    let server = MockServer::with_models(&["model-a", "model-a"], "OK").await;

    let result = probe().check_reachable(&server.endpoint()).await;

    assert_eq!(result.models().len(), 2);
    assert!(result.contains_model("model-a"));
}

#[tokio::test]
async fn extra_model_fields_are_preserved() {
    let server = MockServer::with_models(&["qwen2.5-7b-instruct"], "OK").await;

    let result = probe().check_reachable(&server.endpoint()).await;

    assert_eq!(result.models()[0].owner(), Some("organization_owner"));
}

#[tokio::test]
async fn sends_placeholder_bearer_token() {
    let server = MockServer::with_models(&["m"], "OK").await;

    probe().check_reachable(&server.endpoint()).await;

    assert_eq!(
        server.last_authorization().as_deref(),
        Some("Bearer lm-studio")
    );
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::with_models(&["m"], "OK").await;
    let endpoint = ServerEndpoint::new(format!("{}/", server.base_url()));

    let result = probe().check_reachable(&endpoint).await;

    assert!(result.is_reachable());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn refused_connection_is_connectivity_failure() {
    let endpoint = ServerEndpoint::localhost(closed_port());

    let result = probe().check_reachable(&endpoint).await;

    assert!(!result.is_reachable());
    assert!(result.models().is_empty());
    let error = result.error().expect("error recorded");
    assert_eq!(error.kind(), FailureKind::Connectivity);
    assert!(error.to_string().contains("connection"));
}

#[tokio::test]
async fn server_error_status_is_protocol_failure() {
    let server = MockServer::start(Reply::status(500), Reply::status(500)).await;

    let result = probe().check_reachable(&server.endpoint()).await;

    let error = result.error().expect("error recorded");
    assert_eq!(error.kind(), FailureKind::Protocol);
    assert_eq!(error.to_string(), "bad status code: 500");
}

#[tokio::test]
async fn non_json_body_is_decode_failure() {
    let server = MockServer::start(Reply::raw("<html>not an api</html>"), Reply::status(404)).await;

    let result = probe().check_reachable(&server.endpoint()).await;

    let error = result.error().expect("error recorded");
    assert_eq!(error.kind(), FailureKind::Decode);
    assert!(error.to_string().starts_with("malformed body"));
}

#[tokio::test]
async fn missing_data_field_is_decode_failure() {
    let server = MockServer::start(Reply::json(json!({ "models": [] })), Reply::status(404)).await;

    let result = probe().check_reachable(&server.endpoint()).await;

    assert_eq!(result.error().map(|e| e.kind()), Some(FailureKind::Decode));
}

#[tokio::test]
async fn slow_server_times_out_within_bound() {
    let server = MockServer::start(
        Reply::json(models_body(&["m"])).delayed(Duration::from_secs(3)),
        Reply::status(404),
    )
    .await;
    let probe = InferenceServerProbe::new().with_reachability_timeout(Duration::from_millis(200));

    let started = Instant::now();
    let result = probe.check_reachable(&server.endpoint()).await;

    assert!(started.elapsed() < Duration::from_millis(1500));
    let error = result.error().expect("error recorded");
    assert_eq!(error.kind(), FailureKind::Timeout);
    assert_eq!(error.to_string(), "timeout after 200ms");
}
