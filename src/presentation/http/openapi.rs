// src/presentation/http/openapi.rs
use crate::application::dto::{AuditEntryDto, AuditHistoryDto};
use crate::presentation::http::error::ErrorResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi, ToSchema,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Audit History Service",
        description = "Read-only, paginated audit history for sessions."
    ),
    paths(
        crate::presentation::http::controllers::audit::get_history,
        crate::presentation::http::routes::health,
    ),
    components(schemas(AuditHistoryDto, AuditEntryDto, ErrorResponse, StatusResponse)),
    modifiers(&BearerSecurity),
    tags(
        (name = "Audit", description = "Session audit history"),
        (name = "System", description = "Service health")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn docs_router() -> Router {
    Router::new().route("/docs/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
