// src/application/ports/security.rs
use crate::application::error::ApplicationError;
use crate::application::ApplicationResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Claims extracted from a successfully verified bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// Subject claim, projected into the requesting user id. May be empty
    /// when the token carries no subject.
    pub subject: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub issued_at: Option<DateTime<Utc>>,
    pub issuer: Option<String>,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify signature and temporal claims, returning the token's claims.
    async fn verify(&self, token: &str) -> ApplicationResult<TokenClaims>;

    /// Verify the token and return just its subject. Unlike `verify`, which
    /// tolerates a subject-less token, an empty subject is an error here.
    async fn extract_subject(&self, token: &str) -> ApplicationResult<String> {
        let claims = self.verify(token).await?;
        if claims.subject.is_empty() {
            return Err(ApplicationError::unauthorized("no subject in token"));
        }
        Ok(claims.subject)
    }
}
