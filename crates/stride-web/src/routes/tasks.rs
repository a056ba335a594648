//! Task route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::routes::{double_option, error_response};
use crate::state::AppState;
use stride_core::task::model::Task;
use stride_core::task::TaskUpdate;

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub goal_id: Option<String>,
    pub sprint_id: Option<String>,
    pub priority: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub goal_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sprint_id: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let tasks = stride_core::task::list_tasks(&state.db, &state.cache, &auth.user.id)
        .await
        .map_err(error_response)?;

    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, String)> {
    let task = stride_core::task::create_task(
        &state.db,
        &state.cache,
        &auth.user.id,
        &req.title,
        req.description.as_deref(),
        req.goal_id.as_deref(),
        req.sprint_id.as_deref(),
        req.priority.as_deref(),
    )
    .await
    .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Task>, (StatusCode, String)> {
    let task = stride_core::task::get_task(&state.db, &auth.user.id, &id)
        .await
        .map_err(error_response)?;

    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, (StatusCode, String)> {
    let update = TaskUpdate {
        title: req.title,
        description: req.description,
        goal_id: req.goal_id,
        sprint_id: req.sprint_id,
        status: req.status,
        priority: req.priority,
    };

    let task = stride_core::task::update_task(&state.db, &state.cache, &auth.user.id, &id, update)
        .await
        .map_err(error_response)?;

    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    stride_core::task::delete_task(&state.db, &state.cache, &auth.user.id, &id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
