// src/presentation/http/extractors.rs
use crate::{
    application::error::ApplicationError, domain::credential::Credential,
    presentation::http::state::HttpState,
};
use axum::{
    extract::{FromRequestParts, Path, Query},
    http::{header::AUTHORIZATION, request::Parts},
    Extension,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;

use super::error::HttpError;

/// Credential attached to the request by the authorizer. Runs before any
/// handler-level validation, so a bad credential wins over a bad path.
#[derive(Debug, Clone)]
pub struct Authorized(pub Credential);

#[derive(Debug, Default, Deserialize)]
struct AuthQuery {
    #[serde(default)]
    share_token: Option<String>,
}

impl FromRequestParts<()> for Authorized {
    type Rejection = HttpError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &(),
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    HttpError::from_error(ApplicationError::infrastructure(
                        "application state missing",
                    ))
                })?;

            let session_id = Path::<HashMap<String, String>>::from_request_parts(parts, state)
                .await
                .ok()
                .and_then(|Path(params)| params.get("session_id").cloned())
                .unwrap_or_default();

            let share_token = Query::<AuthQuery>::from_request_parts(parts, state)
                .await
                .map(|Query(query)| query.share_token)
                .unwrap_or_default();

            let authorization = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            let credential = app_state
                .services
                .authorizer()
                .authorize(&session_id, authorization.as_deref(), share_token.as_deref())
                .await
                .map_err(HttpError::from_error)?;

            Ok(Self(credential))
        }
    }
}
