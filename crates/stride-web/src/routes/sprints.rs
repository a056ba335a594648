//! Sprint route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::routes::{double_option, error_response};
use crate::state::AppState;
use stride_core::sprint::model::Sprint;
use stride_core::sprint::SprintUpdate;

#[derive(Deserialize)]
pub struct CreateSprintRequest {
    pub title: String,
    pub goal_id: Option<String>,
    pub starts_on: String,
    pub ends_on: String,
}

#[derive(Deserialize, Default)]
pub struct UpdateSprintRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub goal_id: Option<Option<String>>,
    pub starts_on: Option<String>,
    pub ends_on: Option<String>,
    pub status: Option<String>,
}

pub async fn list_sprints(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Sprint>>, (StatusCode, String)> {
    let sprints = stride_core::sprint::list_sprints(&state.db, &state.cache, &auth.user.id)
        .await
        .map_err(error_response)?;

    Ok(Json(sprints))
}

pub async fn create_sprint(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSprintRequest>,
) -> Result<(StatusCode, Json<Sprint>), (StatusCode, String)> {
    let sprint = stride_core::sprint::create_sprint(
        &state.db,
        &state.cache,
        &auth.user.id,
        &req.title,
        req.goal_id.as_deref(),
        &req.starts_on,
        &req.ends_on,
    )
    .await
    .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(sprint)))
}

pub async fn get_sprint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Sprint>, (StatusCode, String)> {
    let sprint = stride_core::sprint::get_sprint(&state.db, &auth.user.id, &id)
        .await
        .map_err(error_response)?;

    Ok(Json(sprint))
}

pub async fn update_sprint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateSprintRequest>,
) -> Result<Json<Sprint>, (StatusCode, String)> {
    let update = SprintUpdate {
        title: req.title,
        goal_id: req.goal_id,
        starts_on: req.starts_on,
        ends_on: req.ends_on,
        status: req.status,
    };

    let sprint =
        stride_core::sprint::update_sprint(&state.db, &state.cache, &auth.user.id, &id, update)
            .await
            .map_err(error_response)?;

    Ok(Json(sprint))
}

pub async fn delete_sprint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    stride_core::sprint::delete_sprint(&state.db, &state.cache, &auth.user.id, &id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
