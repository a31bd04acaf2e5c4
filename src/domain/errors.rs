// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("session not found")]
    SessionNotFound,
    #[error("resource not found")]
    NotFound,
    #[error("backend error (status {status}): {message}")]
    Backend { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("response decode error: {0}")]
    Decode(String),
    #[error("request timeout")]
    Timeout,
    #[error("service temporarily unavailable")]
    ServiceUnavailable,
}
