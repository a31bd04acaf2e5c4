// tests/e2e_error_statuses.rs
use audit_history::domain::errors::DomainError;
use axum::http::StatusCode;
use std::sync::Arc;

mod support;

use support::{
    audit_entries_body, get_json, history_uri, make_app, session_body, share_grant_body,
    MockGateway, MockVerifier, SESSION_ID,
};

fn app_with_owned_session() -> support::TestApp {
    let gateway = Arc::new(MockGateway::new());
    gateway.set_sessions(&session_body(SESSION_ID, "user-1"));
    gateway.set_audit_logs(&audit_entries_body(1), 1);
    make_app(gateway, Arc::new(MockVerifier::accepting("user-1")))
}

#[tokio::test]
async fn malformed_session_ids_are_bad_requests() {
    let app = app_with_owned_session();
    let headers = [("authorization", "Bearer tok")];

    for bad in [
        "not-a-uuid",
        "550e8400e29b41d4a716446655440000",
        "550g8400-e29b-41d4-a716-446655440000",
        "550e8400-e29b-41d4-a716-44665544000",
    ] {
        let (status, body) = get_json(&app.router, &history_uri(bad, ""), &headers).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad} was not rejected");
        assert_eq!(body["error"], "bad_request");
    }
}

/// Authorization runs before path validation, so a bad session id with a
/// bad credential yields 401, not 400.
#[tokio::test]
async fn credential_check_precedes_session_id_validation() {
    let app = make_app(Arc::new(MockGateway::new()), Arc::new(MockVerifier::rejecting()));

    let (status, body) = get_json(&app.router, &history_uri("not-a-uuid", ""), &[]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn uppercase_hex_session_id_is_accepted() {
    let gateway = Arc::new(MockGateway::new());
    let upper = SESSION_ID.to_uppercase();
    gateway.set_session_shares(&share_grant_body("STK", &upper));
    gateway.set_audit_logs("[]", 0);

    let app = make_app(gateway, Arc::new(MockVerifier::rejecting()));
    let (status, _) = get_json(
        &app.router,
        &history_uri(&upper, "?share_token=STK"),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_pagination_is_a_bad_request() {
    let app = app_with_owned_session();
    let headers = [("authorization", "Bearer tok")];

    for query in ["?limit=abc", "?limit=-1", "?offset=abc", "?offset=-1", "?limit=1.5"] {
        let (status, body) =
            get_json(&app.router, &history_uri(SESSION_ID, query), &headers).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query} was not rejected");
        assert_eq!(body["error"], "bad_request");
    }
}

#[tokio::test]
async fn zero_limit_uses_the_default_page_size() {
    let app = app_with_owned_session();

    let (status, _) = get_json(
        &app.router,
        &history_uri(SESSION_ID, "?limit=0"),
        &[("authorization", "Bearer tok")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let query = app.gateway.last_query("/audit_logs").unwrap();
    assert!(query.contains(&("limit".to_string(), "50".to_string())), "{query:?}");
}

#[tokio::test]
async fn backend_transport_failure_is_an_internal_error() {
    let gateway = Arc::new(MockGateway::new());
    gateway.set_sessions(&session_body(SESSION_ID, "user-1"));
    gateway.fail_audit_logs(DomainError::Transport("connection refused".into()));

    let app = make_app(gateway, Arc::new(MockVerifier::accepting("user-1")));
    let (status, body) = get_json(
        &app.router,
        &history_uri(SESSION_ID, ""),
        &[("authorization", "Bearer tok")],
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_server_error");
    // Internal detail never leaks into the wire body.
    assert_eq!(body["message"], "An internal server error occurred");
}

#[tokio::test]
async fn backend_unavailability_maps_to_service_unavailable() {
    let gateway = Arc::new(MockGateway::new());
    gateway.set_session_shares(&share_grant_body("STK", SESSION_ID));
    gateway.fail_audit_logs(DomainError::ServiceUnavailable);

    let app = make_app(gateway, Arc::new(MockVerifier::rejecting()));
    let (status, body) = get_json(
        &app.router,
        &history_uri(SESSION_ID, "?share_token=STK"),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "service_unavailable");
}

#[tokio::test]
async fn backend_timeout_maps_to_gateway_timeout() {
    let gateway = Arc::new(MockGateway::new());
    gateway.set_session_shares(&share_grant_body("STK", SESSION_ID));
    gateway.fail_audit_logs(DomainError::Timeout);

    let app = make_app(gateway, Arc::new(MockVerifier::rejecting()));
    let (status, body) = get_json(
        &app.router,
        &history_uri(SESSION_ID, "?share_token=STK"),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "timeout");
}

/// A backend failure during share validation degrades to 403, never 5xx:
/// an unverifiable reviewer must not learn whether the backend is down.
#[tokio::test]
async fn share_validation_backend_failure_degrades_to_forbidden() {
    let gateway = Arc::new(MockGateway::new());
    gateway.fail_session_shares(DomainError::Transport("connection refused".into()));

    let app = make_app(gateway, Arc::new(MockVerifier::rejecting()));
    let (status, body) = get_json(
        &app.router,
        &history_uri(SESSION_ID, "?share_token=STK"),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn session_lookup_decode_failure_is_internal() {
    let gateway = Arc::new(MockGateway::new());
    gateway.set_sessions("{not json");

    let app = make_app(gateway, Arc::new(MockVerifier::accepting("user-1")));
    let (status, body) = get_json(
        &app.router,
        &history_uri(SESSION_ID, ""),
        &[("authorization", "Bearer tok")],
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_server_error");
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = make_app(Arc::new(MockGateway::new()), Arc::new(MockVerifier::rejecting()));

    let (status, body) = get_json(&app.router, "/health", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "audit-history");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = make_app(Arc::new(MockGateway::new()), Arc::new(MockVerifier::rejecting()));

    let (status, body) = get_json(&app.router, "/docs/openapi.json", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]
        .get("/api/v1/sessions/{session_id}/history")
        .is_some());
}

#[tokio::test]
async fn responses_carry_a_request_id_header() {
    let app = app_with_owned_session();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::util::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
