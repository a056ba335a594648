//! AI route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::routes::error_response;
use crate::state::AppState;
use stride_core::assist::ChatOutcome;
use stride_core::conversation::model::{Conversation, ConversationDetail};
use stride_core::goal::model::Goal;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub conversation_id: Option<String>,
    pub message: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SuggestGoalsRequest {
    pub focus: Option<String>,
}

#[derive(Deserialize)]
pub struct SuggestTasksRequest {
    pub goal_id: String,
}

#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatOutcome>, (StatusCode, String)> {
    let outcome = stride_core::assist::chat(
        &state.db,
        &state.ai,
        &auth.user.id,
        req.conversation_id.as_deref(),
        &req.message,
    )
    .await
    .map_err(error_response)?;

    Ok(Json(outcome))
}

pub async fn suggest_goals(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SuggestGoalsRequest>,
) -> Result<Json<SuggestionsResponse>, (StatusCode, String)> {
    let suggestions = stride_core::assist::suggest_goals(
        &state.db,
        &state.cache,
        &state.ai,
        &auth.user.id,
        req.focus.as_deref(),
    )
    .await
    .map_err(error_response)?;

    Ok(Json(SuggestionsResponse { suggestions }))
}

pub async fn suggest_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SuggestTasksRequest>,
) -> Result<Json<SuggestionsResponse>, (StatusCode, String)> {
    let suggestions =
        stride_core::assist::suggest_tasks(&state.db, &state.ai, &auth.user.id, &req.goal_id)
            .await
            .map_err(error_response)?;

    Ok(Json(SuggestionsResponse { suggestions }))
}

pub async fn regenerate_goal_scope(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<String>,
) -> Result<Json<Goal>, (StatusCode, String)> {
    let goal = stride_core::assist::regenerate_goal_scope(
        &state.db,
        &state.cache,
        &state.ai,
        &auth.user.id,
        &goal_id,
    )
    .await
    .map_err(error_response)?;

    Ok(Json(goal))
}

pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Conversation>>, (StatusCode, String)> {
    let conversations = stride_core::conversation::list_conversations(&state.db, &auth.user.id)
        .await
        .map_err(error_response)?;

    Ok(Json(conversations))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ConversationDetail>, (StatusCode, String)> {
    let detail = stride_core::conversation::get_conversation_detail(&state.db, &auth.user.id, &id)
        .await
        .map_err(error_response)?;

    Ok(Json(detail))
}
