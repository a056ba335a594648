//! AI conversation and message queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRow {
    pub id: String,
    pub conversation_id: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

pub fn create_conversation(
    pool: &DbPool,
    id: &str,
    user_id: &str,
    title: &str,
) -> DbResult<ConversationRow> {
    let now = chrono::Utc::now().to_rfc3339();
    let row = ConversationRow {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO conversations (id, user_id, title, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.id, row.user_id, row.title, row.created_at, row.updated_at],
        )?;
        Ok(())
    })?;
    Ok(row)
}

pub fn get_conversation(
    pool: &DbPool,
    user_id: &str,
    id: &str,
) -> DbResult<Option<ConversationRow>> {
    pool.with_conn(|conn| {
        let convo = conn
            .query_row(
                "SELECT id, user_id, title, created_at, updated_at
                 FROM conversations WHERE id = ?1 AND user_id = ?2",
                [id, user_id],
                |row| {
                    Ok(ConversationRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        title: row.get(2)?,
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(convo)
    })
}

pub fn list_conversations(pool: &DbPool, user_id: &str) -> DbResult<Vec<ConversationRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, created_at, updated_at
             FROM conversations WHERE user_id = ?1 ORDER BY updated_at DESC",
        )?;
        let rows = stmt
            .query_map([user_id], |row| {
                Ok(ConversationRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}

/// Bump a conversation's updated_at after appending messages.
pub fn touch_conversation(pool: &DbPool, id: &str) -> DbResult<()> {
    let now = chrono::Utc::now().to_rfc3339();
    pool.with_conn(|conn| {
        conn.execute(
            "UPDATE conversations SET updated_at = ?1 WHERE id = ?2",
            [now.as_str(), id],
        )?;
        Ok(())
    })
}

pub fn append_message(
    pool: &DbPool,
    id: &str,
    conversation_id: &str,
    role: &str,
    content: &str,
) -> DbResult<MessageRow> {
    let now = chrono::Utc::now().to_rfc3339();
    let row = MessageRow {
        id: id.to_string(),
        conversation_id: conversation_id.to_string(),
        role: role.to_string(),
        content: content.to_string(),
        created_at: now,
    };
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO messages (id, conversation_id, role, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.id, row.conversation_id, row.role, row.content, row.created_at],
        )?;
        Ok(())
    })?;
    Ok(row)
}

pub fn list_messages(pool: &DbPool, conversation_id: &str) -> DbResult<Vec<MessageRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, conversation_id, role, content, created_at
             FROM messages WHERE conversation_id = ?1 ORDER BY created_at, id",
        )?;
        let rows = stmt
            .query_map([conversation_id], |row| {
                Ok(MessageRow {
                    id: row.get(0)?,
                    conversation_id: row.get(1)?,
                    role: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}
