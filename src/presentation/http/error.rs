// src/presentation/http/error.rs
use crate::application::{error::ApplicationError, ApplicationResult};
use crate::domain::errors::DomainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Wire-level error: a fixed status/code pair plus a short human message.
/// Internal error detail is logged here and never serialized to the client.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Unauthorized(_) => Self::new(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Authentication required",
            ),
            ApplicationError::Forbidden(_) => Self::new(
                StatusCode::FORBIDDEN,
                "forbidden",
                "Access denied to this resource",
            ),
            ApplicationError::NotFound(_) => Self::new(
                StatusCode::NOT_FOUND,
                "not_found",
                "The requested resource was not found",
            ),
            ApplicationError::Validation(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "bad_request", msg)
            }
            ApplicationError::Domain(err) => Self::from_domain(err),
            ApplicationError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "infrastructure error");
                Self::internal()
            }
        }
    }

    fn from_domain(err: DomainError) -> Self {
        match err {
            DomainError::SessionNotFound | DomainError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                "not_found",
                "The requested resource was not found",
            ),
            DomainError::Timeout => {
                tracing::warn!("backend call timed out");
                Self::new(StatusCode::GATEWAY_TIMEOUT, "timeout", "Request timeout")
            }
            DomainError::ServiceUnavailable => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "Service temporarily unavailable",
            ),
            err @ (DomainError::Backend { .. }
            | DomainError::Transport(_)
            | DomainError::Decode(_)) => {
                tracing::error!(error = %err, "backend failure");
                Self::internal()
            }
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_server_error",
            "An internal server error occurred",
        )
    }

    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
