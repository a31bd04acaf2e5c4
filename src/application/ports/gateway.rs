// src/application/ports/gateway.rs
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use bytes::Bytes;

/// One page of raw backend output plus the total row count the backend
/// reported for the filter (0 when the count header was absent or garbled).
#[derive(Debug, Clone)]
pub struct GatewayPage {
    pub body: Bytes,
    pub total: u64,
}

/// Seam over the remote data API. The production implementation speaks the
/// PostgREST filter/order/limit/offset protocol; tests substitute a fake.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// GET `path` with the given query pairs. The pair order is fixed per
    /// call site so request URLs stay stable.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> DomainResult<GatewayPage>;

    /// POST `payload` as JSON to `path`.
    async fn post(&self, path: &str, payload: &serde_json::Value) -> DomainResult<Bytes>;
}
