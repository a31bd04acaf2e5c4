use crate::application::ports::BackendGatewayPort;
use crate::domain::audit::{AuditEntry, Session, ShareGrant};
use crate::domain::errors::{DomainError, DomainResult};
use std::sync::Arc;

/// Typed queries over the backend gateway. Decode failures surface as
/// `DomainError::Decode`, never as transport errors.
pub struct AuditRepository {
    gateway: Arc<BackendGatewayPort>,
}

impl AuditRepository {
    pub fn new(gateway: Arc<BackendGatewayPort>) -> Self {
        Self { gateway }
    }

    /// Audit entries for a session, newest first, plus the backend's total
    /// row count for the filter.
    pub async fn find_by_session_id(
        &self,
        session_id: &str,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<AuditEntry>, u64)> {
        let query = [
            ("session_id", format!("eq.{session_id}")),
            ("order", "timestamp.desc".to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("select", "*".to_string()),
        ];

        let page = self.gateway.get("/audit_logs", &query).await.map_err(|err| {
            tracing::error!(session_id, error = %err, "failed to fetch audit logs");
            err
        })?;

        let entries: Vec<AuditEntry> = serde_json::from_slice(&page.body).map_err(|err| {
            tracing::error!(session_id, error = %err, "failed to parse audit logs");
            DomainError::Decode(format!("failed to parse audit logs: {err}"))
        })?;

        tracing::debug!(
            session_id,
            count = entries.len(),
            total = page.total,
            "fetched audit logs"
        );

        Ok((entries, page.total))
    }

    pub async fn get_session(&self, session_id: &str) -> DomainResult<Session> {
        let query = [
            ("id", format!("eq.{session_id}")),
            ("select", "id,user_id".to_string()),
            ("limit", "1".to_string()),
        ];

        let page = self.gateway.get("/sessions", &query).await.map_err(|err| {
            tracing::error!(session_id, error = %err, "failed to fetch session");
            err
        })?;

        let mut sessions: Vec<Session> = serde_json::from_slice(&page.body).map_err(|err| {
            tracing::error!(session_id, error = %err, "failed to parse session");
            DomainError::Decode(format!("failed to parse session: {err}"))
        })?;

        if sessions.is_empty() {
            return Err(DomainError::SessionNotFound);
        }
        Ok(sessions.remove(0))
    }

    /// True when a grant row matches `(token, session_id)`. The grant's own
    /// `expires_at` column is not consulted.
    pub async fn validate_share_token(
        &self,
        token: &str,
        session_id: &str,
    ) -> DomainResult<bool> {
        let query = [
            ("token", format!("eq.{token}")),
            ("session_id", format!("eq.{session_id}")),
            ("select", "token,session_id,expires_at".to_string()),
            ("limit", "1".to_string()),
        ];

        let page = self
            .gateway
            .get("/session_shares", &query)
            .await
            .map_err(|err| {
                tracing::error!(session_id, error = %err, "failed to validate share token");
                err
            })?;

        let shares: Vec<ShareGrant> = serde_json::from_slice(&page.body).map_err(|err| {
            tracing::error!(session_id, error = %err, "failed to parse share token");
            DomainError::Decode(format!("failed to parse share token: {err}"))
        })?;

        Ok(!shares.is_empty())
    }
}
