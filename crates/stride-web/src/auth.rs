//! Bearer-token auth extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};

use crate::state::AppState;

/// The authenticated user, resolved from the `Authorization: Bearer` header.
///
/// Carries the session token so logout can invalidate it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: stride_core::user::model::User,
    pub token: String,
}

/// Pull the bearer token out of an Authorization header, if any.
pub(crate) fn bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or((StatusCode::UNAUTHORIZED, "Missing bearer token".to_string()))?;

        let user = stride_core::user::authenticate(&state.db, &token)
            .await
            .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

        Ok(AuthUser { user, token })
    }
}
