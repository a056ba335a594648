//! Goal route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::routes::{double_option, error_response};
use crate::state::AppState;
use stride_core::goal::model::Goal;
use stride_core::goal::GoalUpdate;

#[derive(Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub target_date: Option<Option<String>>,
}

pub async fn list_goals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Goal>>, (StatusCode, String)> {
    let goals = stride_core::goal::list_goals(&state.db, &state.cache, &auth.user.id)
        .await
        .map_err(error_response)?;

    Ok(Json(goals))
}

pub async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), (StatusCode, String)> {
    let goal = stride_core::goal::create_goal(
        &state.db,
        &state.cache,
        &auth.user.id,
        &req.title,
        req.description.as_deref(),
        req.target_date.as_deref(),
    )
    .await
    .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn get_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Goal>, (StatusCode, String)> {
    let goal = stride_core::goal::get_goal(&state.db, &auth.user.id, &id)
        .await
        .map_err(error_response)?;

    Ok(Json(goal))
}

pub async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<Goal>, (StatusCode, String)> {
    let update = GoalUpdate {
        title: req.title,
        description: req.description,
        status: req.status,
        target_date: req.target_date,
    };

    let goal = stride_core::goal::update_goal(&state.db, &state.cache, &auth.user.id, &id, update)
        .await
        .map_err(error_response)?;

    Ok(Json(goal))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    stride_core::goal::delete_goal(&state.db, &state.cache, &auth.user.id, &id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
