// src/presentation/http/routes.rs
use crate::presentation::http::controllers::audit;
use crate::presentation::http::openapi::{self, StatusResponse};
use crate::presentation::http::state::HttpState;
use axum::{http::Method, routing::get, Extension, Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .merge(openapi::docs_router())
        .merge(system_routes())
        .merge(audit_routes())
        .layer(
            // Request-id is assigned outermost so the trace span and every
            // log line inside it can carry the id.
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors)
        .layer(Extension(state))
}

fn audit_routes() -> Router {
    Router::new().route(
        "/api/v1/sessions/{session_id}/history",
        get(audit::get_history),
    )
}

fn system_routes() -> Router {
    Router::new().route("/health", get(health))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    security([]),
    tag = "System"
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
        service: "audit-history".into(),
    })
}
