use crate::application::dto::AuditHistoryDto;
use crate::application::queries::audit::GetHistoryQuery;
use crate::domain::pagination::Pagination;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authorized;
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};

const DEFAULT_LIMIT: i64 = 50;
const DEFAULT_OFFSET: i64 = 0;

#[derive(Debug, serde::Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{session_id}/history",
    params(
        ("session_id" = String, Path, description = "Session identifier (canonical UUID)"),
        ("limit" = Option<i64>, Query, description = "Items per page, clamped to 1-100 (default 50)"),
        ("offset" = Option<i64>, Query, description = "Items to skip (default 0)"),
        ("share_token" = Option<String>, Query, description = "Share token granting session-scoped reviewer access"),
    ),
    responses(
        (status = 200, description = "One page of audit history, newest first.", body = AuditHistoryDto),
        (status = 400, description = "Malformed session id or pagination parameter.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Share token rejected or session owned by someone else.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Session does not exist.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Backend failure.", body = crate::presentation::http::error::ErrorResponse),
    ),
    security(("bearer_auth" = []), ()),
    tag = "Audit"
)]
pub async fn get_history(
    Extension(state): Extension<HttpState>,
    Authorized(credential): Authorized,
    Path(session_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> HttpResult<Json<AuditHistoryDto>> {
    if !is_canonical_uuid(&session_id) {
        return Err(HttpError::bad_request("Invalid session ID format"));
    }

    let limit = parse_page_param(params.limit.as_deref(), DEFAULT_LIMIT)
        .ok_or_else(|| HttpError::bad_request("Invalid limit parameter"))?;
    let offset = parse_page_param(params.offset.as_deref(), DEFAULT_OFFSET)
        .ok_or_else(|| HttpError::bad_request("Invalid offset parameter"))?;

    tracing::debug!(
        session_id = %session_id,
        limit,
        offset,
        share_token = credential.is_share(),
        "processing audit history request"
    );

    let response = state
        .services
        .audit_query()
        .get_history(
            &credential,
            GetHistoryQuery {
                session_id,
                pagination: Pagination::new(limit, offset),
            },
        )
        .await
        .into_http()?;

    Ok(Json(response))
}

/// Non-negative integer query parameter; `None` on any malformed input.
fn parse_page_param(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw {
        None => Some(default),
        Some(raw) => raw.parse::<i64>().ok().filter(|value| *value >= 0),
    }
}

/// Canonical 36-character UUID: hyphens at 8/13/18/23, hex everywhere else,
/// case-insensitive.
fn is_canonical_uuid(value: &str) -> bool {
    if value.len() != 36 {
        return false;
    }
    value.bytes().enumerate().all(|(i, byte)| match i {
        8 | 13 | 18 | 23 => byte == b'-',
        _ => byte.is_ascii_hexdigit(),
    })
}
