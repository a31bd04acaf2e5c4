// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Shared handle threaded through the router as an `Extension`.
///
/// Carries the authorizer and audit query services; the credential cache
/// behind them is the only long-lived mutable state in the process.
#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
}

impl HttpState {
    pub fn new(services: Arc<ApplicationServices>) -> Self {
        Self { services }
    }
}
