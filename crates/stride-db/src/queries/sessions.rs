//! Session queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::OptionalExtension;

#[derive(Debug, Clone)]
pub struct SessionRow {
    pub token: String,
    pub user_id: String,
    pub created_at: String,
    pub expires_at: String,
}

pub fn create_session(
    pool: &DbPool,
    token: &str,
    user_id: &str,
    ttl: chrono::Duration,
) -> DbResult<SessionRow> {
    let now = chrono::Utc::now();
    let row = SessionRow {
        token: token.to_string(),
        user_id: user_id.to_string(),
        created_at: now.to_rfc3339(),
        expires_at: (now + ttl).to_rfc3339(),
    };
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO sessions (token, user_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.token, row.user_id, row.created_at, row.expires_at],
        )?;
        Ok(())
    })?;
    Ok(row)
}

pub fn get_session(pool: &DbPool, token: &str) -> DbResult<Option<SessionRow>> {
    pool.with_conn(|conn| {
        let session = conn
            .query_row(
                "SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = ?1",
                [token],
                |row| {
                    Ok(SessionRow {
                        token: row.get(0)?,
                        user_id: row.get(1)?,
                        created_at: row.get(2)?,
                        expires_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(session)
    })
}

/// Delete a session. Returns false when the token was already gone.
pub fn delete_session(pool: &DbPool, token: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let n = conn.execute("DELETE FROM sessions WHERE token = ?1", [token])?;
        Ok(n > 0)
    })
}

/// Drop sessions whose expiry is in the past. Returns the number removed.
pub fn purge_expired(pool: &DbPool) -> DbResult<usize> {
    let now = chrono::Utc::now().to_rfc3339();
    pool.with_conn(|conn| {
        let n = conn.execute("DELETE FROM sessions WHERE expires_at < ?1", [now])?;
        Ok(n)
    })
}
