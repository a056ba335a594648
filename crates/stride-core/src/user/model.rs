//! User domain models.
//!
//! [`User`] is the client-safe projection: it never carries the password
//! hash, which stays inside the row type and the auth functions.

use serde::{Deserialize, Serialize};
use stride_db::queries::users::UserRow;

/// A registered user, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: String,
}

impl User {
    /// Create a User from a database row, dropping server-internal fields.
    pub fn from_row(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            created_at: row.created_at,
        }
    }
}

/// A user together with a freshly issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}
