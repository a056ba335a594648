//! Centralized error types for Stride.

use thiserror::Error;

/// Main error type for Stride operations.
#[derive(Error, Debug)]
pub enum StrideError {
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired session token")]
    InvalidToken,

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Sprint not found: {0}")]
    SprintNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("AI backend error: {0}")]
    Ai(String),

    #[error("Database error: {0}")]
    Database(#[from] stride_db::DbError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Stride operations.
pub type StrideResult<T> = Result<T, StrideError>;

impl StrideError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
