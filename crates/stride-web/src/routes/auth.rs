//! Auth route handlers.

use axum::http::HeaderMap;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::auth::bearer_token;
use crate::routes::error_response;
use crate::state::AppState;
use stride_core::user::model::AuthenticatedUser;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthenticatedUser>), (StatusCode, String)> {
    let auth = stride_core::user::register(
        &state.db,
        &req.email,
        &req.password,
        req.display_name.as_deref(),
    )
    .await
    .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(auth)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthenticatedUser>, (StatusCode, String)> {
    let auth = stride_core::user::login(&state.db, &req.email, &req.password)
        .await
        .map_err(error_response)?;

    Ok(Json(auth))
}

/// Logout is idempotent: a token that is already dead still gets a 204.
/// Only a missing header is rejected.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, String)> {
    let token = bearer_token(&headers)
        .ok_or((StatusCode::UNAUTHORIZED, "Missing bearer token".to_string()))?;

    stride_core::user::logout(&state.db, &token)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
