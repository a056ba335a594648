//! Goal domain models.

use serde::{Deserialize, Serialize};
use stride_db::queries::goals::GoalRow;

/// A long-running objective owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub target_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Goal {
    /// Create a Goal from a database row.
    pub fn from_row(row: GoalRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            status: GoalStatus::from_str(&row.status),
            target_date: row.target_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Goal lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Completed,
    Archived,
}

impl GoalStatus {
    /// Parse from string, defaulting to Active for unknown values.
    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Active)
    }

    /// Strict parse; None for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}
