// src/application/services/mod.rs
mod authorizer;

pub use authorizer::AuthorizerService;

use crate::application::ports::{ClockPort, TokenVerifierPort};
use crate::application::queries::audit::AuditQueryService;
use crate::infrastructure::repositories::AuditRepository;
use crate::infrastructure::security::token_cache::TokenCache;
use std::sync::Arc;
use std::time::Duration;

/// Everything the HTTP layer needs, wired once at startup.
pub struct ApplicationDependencies {
    pub repository: Arc<AuditRepository>,
    pub verifier: Arc<TokenVerifierPort>,
    pub cache: Arc<TokenCache>,
    pub clock: Arc<ClockPort>,
    pub jwt_ttl: Duration,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

pub struct ApplicationServices {
    authorizer: AuthorizerService,
    audit_query: AuditQueryService,
    token_cache: Arc<TokenCache>,
}

impl ApplicationServices {
    pub fn new(deps: ApplicationDependencies) -> Self {
        let authorizer = AuthorizerService::new(
            Arc::clone(&deps.verifier),
            Arc::clone(&deps.cache),
            Arc::clone(&deps.repository),
            Arc::clone(&deps.clock),
            deps.jwt_ttl,
        );
        let audit_query = AuditQueryService::new(
            Arc::clone(&deps.repository),
            deps.default_page_size,
            deps.max_page_size,
        );

        Self {
            authorizer,
            audit_query,
            token_cache: deps.cache,
        }
    }

    pub fn authorizer(&self) -> &AuthorizerService {
        &self.authorizer
    }

    pub fn audit_query(&self) -> &AuditQueryService {
        &self.audit_query
    }

    pub fn token_cache(&self) -> &Arc<TokenCache> {
        &self.token_cache
    }
}
