// tests/support/mocks.rs
use async_trait::async_trait;
use audit_history::application::error::ApplicationError;
use audit_history::application::ports::gateway::{BackendGateway, GatewayPage};
use audit_history::application::ports::security::{TokenClaims, TokenVerifier};
use audit_history::application::ApplicationResult;
use audit_history::domain::errors::{DomainError, DomainResult};
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scriptable backend: one canned result per endpoint, plus a record of
/// every GET issued so tests can assert on paths and query strings.
pub struct MockGateway {
    pub audit_logs: Mutex<DomainResult<(String, u64)>>,
    pub sessions: Mutex<DomainResult<String>>,
    pub session_shares: Mutex<DomainResult<String>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            audit_logs: Mutex::new(Ok(("[]".to_string(), 0))),
            sessions: Mutex::new(Ok("[]".to_string())),
            session_shares: Mutex::new(Ok("[]".to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_audit_logs(&self, body: &str, total: u64) {
        *self.audit_logs.lock().unwrap() = Ok((body.to_string(), total));
    }

    pub fn set_sessions(&self, body: &str) {
        *self.sessions.lock().unwrap() = Ok(body.to_string());
    }

    pub fn set_session_shares(&self, body: &str) {
        *self.session_shares.lock().unwrap() = Ok(body.to_string());
    }

    pub fn fail_audit_logs(&self, err: DomainError) {
        *self.audit_logs.lock().unwrap() = Err(err);
    }

    pub fn fail_sessions(&self, err: DomainError) {
        *self.sessions.lock().unwrap() = Err(err);
    }

    pub fn fail_session_shares(&self, err: DomainError) {
        *self.session_shares.lock().unwrap() = Err(err);
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    pub fn last_query(&self, path: &str) -> Option<Vec<(String, String)>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
    }
}

#[async_trait]
impl BackendGateway for MockGateway {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> DomainResult<GatewayPage> {
        let recorded = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.calls.lock().unwrap().push((path.to_string(), recorded));

        let result = match path {
            "/audit_logs" => self.audit_logs.lock().unwrap().clone(),
            "/sessions" => self.sessions.lock().unwrap().clone().map(|body| (body, 0)),
            "/session_shares" => self
                .session_shares
                .lock()
                .unwrap()
                .clone()
                .map(|body| (body, 0)),
            other => Err(DomainError::Transport(format!("unexpected path: {other}"))),
        };

        result.map(|(body, total)| GatewayPage {
            body: Bytes::from(body),
            total,
        })
    }

    async fn post(&self, _path: &str, _payload: &serde_json::Value) -> DomainResult<Bytes> {
        Ok(Bytes::from_static(b"[]"))
    }
}

/// Verifier with a fixed outcome and an invocation counter; lets tests
/// prove a request was (or was not) served from the credential cache.
pub struct MockVerifier {
    subject: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    calls: AtomicUsize,
}

impl MockVerifier {
    pub fn accepting(subject: &str) -> Self {
        Self {
            subject: Some(subject.to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            subject: None,
            expires_at: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenVerifier for MockVerifier {
    async fn verify(&self, _token: &str) -> ApplicationResult<TokenClaims> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.subject {
            Some(subject) => Ok(TokenClaims {
                subject: subject.clone(),
                expires_at: self.expires_at,
                issued_at: None,
                issuer: None,
            }),
            None => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}
