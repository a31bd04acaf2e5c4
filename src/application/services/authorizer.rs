// src/application/services/authorizer.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::{ClockPort, TokenVerifierPort};
use crate::domain::credential::Credential;
use crate::infrastructure::repositories::AuditRepository;
use crate::infrastructure::security::token_cache::{CachedCredential, TokenCache};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a single verification or share-lookup round-trip,
/// independent of the transport-level timeout.
const VALIDATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Decides which credential a request carries.
///
/// A non-empty `share_token` always wins: the bearer header is not even
/// inspected on that path, and a share failure never falls back to bearer
/// verification. Successful verifications are cached; failures are not.
pub struct AuthorizerService {
    verifier: Arc<TokenVerifierPort>,
    cache: Arc<TokenCache>,
    repository: Arc<AuditRepository>,
    clock: Arc<ClockPort>,
    jwt_ttl: Duration,
}

impl AuthorizerService {
    pub fn new(
        verifier: Arc<TokenVerifierPort>,
        cache: Arc<TokenCache>,
        repository: Arc<AuditRepository>,
        clock: Arc<ClockPort>,
        jwt_ttl: Duration,
    ) -> Self {
        Self {
            verifier,
            cache,
            repository,
            clock,
            jwt_ttl,
        }
    }

    pub async fn authorize(
        &self,
        session_id: &str,
        authorization: Option<&str>,
        share_token: Option<&str>,
    ) -> ApplicationResult<Credential> {
        if session_id.is_empty() {
            tracing::warn!("missing session id in path");
            return Err(ApplicationError::unauthorized("missing session id"));
        }

        if let Some(token) = share_token.filter(|t| !t.is_empty()) {
            return self.authorize_share(token, session_id).await;
        }

        self.authorize_bearer(authorization).await
    }

    async fn authorize_share(
        &self,
        token: &str,
        session_id: &str,
    ) -> ApplicationResult<Credential> {
        if let Some(cached) = self.cache.get_share(token, session_id) {
            tracing::debug!(session_id, "share token found in cache");
            return Ok(Credential::Share {
                session_id: session_id.to_string(),
                expires_at: Some(cached.expires_at),
            });
        }

        let lookup = tokio::time::timeout(
            VALIDATION_TIMEOUT,
            self.repository.validate_share_token(token, session_id),
        )
        .await;

        // Whether the backend is down, slow, or the grant simply does not
        // exist, the caller learns only "not allowed".
        let valid = match lookup {
            Err(_) => {
                tracing::warn!(session_id, "share token validation timed out");
                return Err(ApplicationError::forbidden("share token rejected"));
            }
            Ok(Err(err)) => {
                tracing::error!(session_id, error = %err, "share token validation error");
                return Err(ApplicationError::forbidden("share token rejected"));
            }
            Ok(Ok(valid)) => valid,
        };

        if !valid {
            tracing::warn!(session_id, "invalid share token");
            return Err(ApplicationError::forbidden("share token rejected"));
        }

        let expires_at = self.clock.now() + chrono::Duration::hours(24);
        self.cache.set_share(
            token,
            session_id,
            CachedCredential {
                user_id: None,
                session_id: Some(session_id.to_string()),
                expires_at,
            },
        );
        tracing::debug!(session_id, "share token validated and cached");

        Ok(Credential::Share {
            session_id: session_id.to_string(),
            expires_at: Some(expires_at),
        })
    }

    async fn authorize_bearer(&self, authorization: Option<&str>) -> ApplicationResult<Credential> {
        let header = match authorization {
            Some(header) if !header.is_empty() => header,
            _ => {
                tracing::warn!("missing authorization header");
                return Err(ApplicationError::unauthorized("missing authorization header"));
            }
        };

        let token = match extract_bearer_token(header) {
            Some(token) => token,
            None => {
                tracing::warn!("invalid authorization header format");
                return Err(ApplicationError::unauthorized(
                    "malformed authorization header",
                ));
            }
        };

        if let Some(cached) = self.cache.get_bearer(token) {
            tracing::debug!(user_id = ?cached.user_id, "bearer token found in cache");
            return Ok(Credential::Bearer {
                user_id: cached.user_id.unwrap_or_default(),
                expires_at: Some(cached.expires_at),
            });
        }

        let claims = match tokio::time::timeout(VALIDATION_TIMEOUT, self.verifier.verify(token))
            .await
        {
            Err(_) => {
                tracing::warn!("bearer token verification timed out");
                return Err(ApplicationError::unauthorized("bearer token rejected"));
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "bearer token verification failed");
                return Err(ApplicationError::unauthorized("bearer token rejected"));
            }
            Ok(Ok(claims)) => claims,
        };

        // Tokens without an exp claim get the cache TTL as their embedded
        // horizon so the read-side expiry check still has something to bite.
        let expires_at = claims.expires_at.unwrap_or_else(|| {
            self.clock.now() + chrono::Duration::seconds(self.jwt_ttl.as_secs() as i64)
        });
        self.cache.set_bearer(
            token,
            CachedCredential {
                user_id: Some(claims.subject.clone()),
                session_id: None,
                expires_at,
            },
        );
        tracing::debug!(user_id = %claims.subject, "bearer token verified and cached");

        Ok(Credential::Bearer {
            user_id: claims.subject,
            expires_at: Some(expires_at),
        })
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively and must be followed by
/// whitespace; surrounding and repeated inner whitespace are tolerated.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let scheme = header.get(..6)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let rest = &header[6..];
    if !rest.starts_with(|c: char| c.is_ascii_whitespace()) {
        return None;
    }
    let token = rest.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
