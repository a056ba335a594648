//! Route handlers.

pub mod ai;
pub mod auth;
pub mod goals;
pub mod health;
pub mod sprints;
pub mod tasks;

use axum::http::StatusCode;
use serde::{Deserialize, Deserializer};
use stride_core::StrideError;

/// Deserializer for `Option<Option<T>>` update fields: a missing field stays
/// None, an explicit JSON null becomes `Some(None)` and clears the column.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Map a domain error to an HTTP response.
pub(crate) fn error_response(e: StrideError) -> (StatusCode, String) {
    let status = match &e {
        StrideError::ValidationError(_) => StatusCode::BAD_REQUEST,
        StrideError::InvalidCredentials | StrideError::InvalidToken => StatusCode::UNAUTHORIZED,
        StrideError::EmailTaken(_) => StatusCode::CONFLICT,
        StrideError::GoalNotFound(_)
        | StrideError::SprintNotFound(_)
        | StrideError::TaskNotFound(_)
        | StrideError::ConversationNotFound(_) => StatusCode::NOT_FOUND,
        StrideError::Ai(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %e, "request failed");
    }
    (status, e.to_string())
}
