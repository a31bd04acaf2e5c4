// tests/support/helpers.rs
use crate::support::mocks::MockGateway;
use audit_history::application::ports::security::TokenVerifier;
use audit_history::application::ports::time::Clock;
use audit_history::application::services::{ApplicationDependencies, ApplicationServices};
use audit_history::infrastructure::repositories::AuditRepository;
use audit_history::infrastructure::security::token_cache::TokenCache;
use audit_history::infrastructure::time::SystemClock;
use audit_history::presentation::http::{routes::build_router, state::HttpState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt as _;

pub const SESSION_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const OTHER_SESSION_ID: &str = "662fa511-f30c-52e5-b827-557766551111";

pub struct TestApp {
    pub router: Router,
    pub services: Arc<ApplicationServices>,
    pub gateway: Arc<MockGateway>,
}

pub fn make_app(gateway: Arc<MockGateway>, verifier: Arc<dyn TokenVerifier>) -> TestApp {
    let repository = Arc::new(AuditRepository::new(gateway.clone()));
    let cache = Arc::new(TokenCache::new(
        Duration::from_secs(300),
        Duration::from_secs(60),
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(ApplicationDependencies {
        repository,
        verifier,
        cache,
        clock,
        jwt_ttl: Duration::from_secs(300),
        default_page_size: 50,
        max_page_size: 100,
    }));

    let router = build_router(HttpState::new(Arc::clone(&services)));

    TestApp {
        router,
        services,
        gateway,
    }
}

pub async fn get_json(
    router: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let (status, body) = get_raw(router, uri, headers).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body should be JSON")
    };
    (status, json)
}

pub async fn get_raw(
    router: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub fn history_uri(session_id: &str, suffix: &str) -> String {
    format!("/api/v1/sessions/{session_id}/history{suffix}")
}

/// `count` audit rows for `SESSION_ID`, newest first, as the backend would
/// return them.
pub fn audit_entries_body(count: usize) -> String {
    let entries: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id":"{}","sessionId":"{SESSION_ID}","userId":"user-1","action":"{}","timestamp":"2024-01-15T10:0{}:00Z","details":{{"field":"title","revision":{i}}},"ipAddress":"203.0.113.7","userAgent":"integration-tests"}}"#,
                uuid::Uuid::new_v4(),
                audit_history::domain::audit::actions::EDIT,
                9 - i.min(9),
            )
        })
        .collect();
    format!("[{}]", entries.join(","))
}

pub fn session_body(session_id: &str, owner: &str) -> String {
    format!(r#"[{{"id":"{session_id}","user_id":"{owner}"}}]"#)
}

pub fn share_grant_body(token: &str, session_id: &str) -> String {
    format!(r#"[{{"token":"{token}","session_id":"{session_id}","expires_at":null}}]"#)
}

/// HS256 token signed with `secret`; `exp_offset_secs` is relative to now.
pub fn mint_hs256(secret: &str, sub: &str, exp_offset_secs: i64) -> String {
    #[derive(serde::Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        exp: i64,
        iat: i64,
    }

    let now = chrono::Utc::now().timestamp();
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &Claims {
            sub,
            exp: now + exp_offset_secs,
            iat: now - 10,
        },
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
