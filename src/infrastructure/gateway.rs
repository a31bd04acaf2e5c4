// src/infrastructure/gateway.rs
use crate::application::ports::gateway::{BackendGateway, GatewayPage};
use crate::config::AppConfig;
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

/// HTTP client for the PostgREST-style data API.
///
/// One instance is shared by every in-flight request; reqwest's internal
/// pool handles connection reuse within the configured idle limits.
pub struct PostgrestClient {
    base_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl PostgrestClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        // reqwest only exposes a per-host idle cap, so the process-wide
        // idle limit acts as an upper bound on it.
        let idle_per_host = config
            .http_max_conns_per_host()
            .min(config.http_max_idle_conns());

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .pool_idle_timeout(config.http_idle_conn_timeout())
            .pool_max_idle_per_host(idle_per_host)
            .build()?;

        Ok(Self {
            base_url: format!("{}/rest/v1", config.supabase_url().trim_end_matches('/')),
            service_key: config.supabase_service_role_key().to_string(),
            client,
        })
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "count=exact")
    }
}

#[async_trait]
impl BackendGateway for PostgrestClient {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> DomainResult<GatewayPage> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = "GET", url = %url, "backend request");

        let response = self
            .request(self.client.get(&url).query(query))
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        let total = response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range)
            .unwrap_or(0);

        let body = response.bytes().await.map_err(map_reqwest)?;
        tracing::debug!(status = status.as_u16(), body_size = body.len(), "backend response");

        if status.as_u16() >= 400 {
            return Err(decode_backend_error(status.as_u16(), &body));
        }

        Ok(GatewayPage { body, total })
    }

    async fn post(&self, path: &str, payload: &serde_json::Value) -> DomainResult<Bytes> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = "POST", url = %url, "backend request");

        let response = self
            .request(self.client.post(&url).json(payload))
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest)?;
        tracing::debug!(status = status.as_u16(), body_size = body.len(), "backend response");

        if status.as_u16() >= 400 {
            return Err(decode_backend_error(status.as_u16(), &body));
        }

        Ok(body)
    }
}

fn map_reqwest(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::Timeout
    } else {
        DomainError::Transport(err.to_string())
    }
}

/// Total row count from a `Content-Range` header of the exact form
/// `<start>-<end>/<total>`. Any other shape yields `None`.
fn parse_content_range(value: &str) -> Option<u64> {
    let (range, total) = value.split_once('/')?;
    let (start, end) = range.split_once('-')?;
    start.trim().parse::<u64>().ok()?;
    end.trim().parse::<u64>().ok()?;
    total.trim().parse::<u64>().ok()
}

#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn decode_backend_error(status: u16, body: &[u8]) -> DomainError {
    if let Ok(parsed) = serde_json::from_slice::<BackendErrorBody>(body) {
        if !parsed.message.is_empty() {
            tracing::debug!(
                status,
                details = ?parsed.details,
                hint = ?parsed.hint,
                code = ?parsed.code,
                "structured backend error"
            );
            return DomainError::Backend {
                status,
                message: parsed.message,
            };
        }
    }

    DomainError::Backend {
        status,
        message: format!("status {status}: {}", String::from_utf8_lossy(body)),
    }
}
