//! User queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: String,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        display_name: row.get(3)?,
        created_at: row.get(4)?,
    })
}

const COLUMNS: &str = "id, email, password_hash, display_name, created_at";

pub fn create_user(
    pool: &DbPool,
    id: &str,
    email: &str,
    password_hash: &str,
    display_name: Option<&str>,
) -> DbResult<UserRow> {
    let now = chrono::Utc::now().to_rfc3339();
    let row = UserRow {
        id: id.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        display_name: display_name.map(str::to_string),
        created_at: now,
    };
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO users (id, email, password_hash, display_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                row.id,
                row.email,
                row.password_hash,
                row.display_name,
                row.created_at
            ],
        )?;
        Ok(())
    })?;
    Ok(row)
}

pub fn get_user(pool: &DbPool, id: &str) -> DbResult<Option<UserRow>> {
    pool.with_conn(|conn| {
        let user = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM users WHERE id = ?1"),
                [id],
                map_row,
            )
            .optional()?;
        Ok(user)
    })
}

pub fn get_user_by_email(pool: &DbPool, email: &str) -> DbResult<Option<UserRow>> {
    pool.with_conn(|conn| {
        let user = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM users WHERE email = ?1"),
                [email],
                map_row,
            )
            .optional()?;
        Ok(user)
    })
}
