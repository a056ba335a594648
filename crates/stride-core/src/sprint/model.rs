//! Sprint domain models.

use serde::{Deserialize, Serialize};
use stride_db::queries::sprints::SprintRow;

/// A time-boxed iteration, optionally attached to a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprint {
    pub id: String,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub title: String,
    pub starts_on: String,
    pub ends_on: String,
    pub status: SprintStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Sprint {
    /// Create a Sprint from a database row.
    pub fn from_row(row: SprintRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            goal_id: row.goal_id,
            title: row.title,
            starts_on: row.starts_on,
            ends_on: row.ends_on,
            status: SprintStatus::from_str(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Sprint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    Planned,
    Active,
    Completed,
}

impl SprintStatus {
    /// Parse from string, defaulting to Planned for unknown values.
    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Planned)
    }

    /// Strict parse; None for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planned" => Some(Self::Planned),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}
