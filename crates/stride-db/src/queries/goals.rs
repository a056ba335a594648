//! Goal queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub target_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GoalRow> {
    Ok(GoalRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        target_date: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const COLUMNS: &str = "id, user_id, title, description, status, target_date, created_at, updated_at";

pub fn create_goal(
    pool: &DbPool,
    id: &str,
    user_id: &str,
    title: &str,
    description: Option<&str>,
    target_date: Option<&str>,
) -> DbResult<GoalRow> {
    let now = chrono::Utc::now().to_rfc3339();
    let row = GoalRow {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        description: description.map(str::to_string),
        status: "active".to_string(),
        target_date: target_date.map(str::to_string),
        created_at: now.clone(),
        updated_at: now,
    };
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO goals (id, user_id, title, description, status, target_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.id,
                row.user_id,
                row.title,
                row.description,
                row.status,
                row.target_date,
                row.created_at,
                row.updated_at
            ],
        )?;
        Ok(())
    })?;
    Ok(row)
}

pub fn get_goal(pool: &DbPool, user_id: &str, id: &str) -> DbResult<Option<GoalRow>> {
    pool.with_conn(|conn| {
        let goal = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM goals WHERE id = ?1 AND user_id = ?2"),
                [id, user_id],
                map_row,
            )
            .optional()?;
        Ok(goal)
    })
}

pub fn list_goals(pool: &DbPool, user_id: &str) -> DbResult<Vec<GoalRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM goals WHERE user_id = ?1 ORDER BY created_at"
        ))?;
        let rows = stmt
            .query_map([user_id], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}

/// Full-row update; callers apply partial changes to a fetched row first.
pub fn update_goal(pool: &DbPool, row: &GoalRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "UPDATE goals SET title = ?1, description = ?2, status = ?3, target_date = ?4, updated_at = ?5
             WHERE id = ?6 AND user_id = ?7",
            rusqlite::params![
                row.title,
                row.description,
                row.status,
                row.target_date,
                row.updated_at,
                row.id,
                row.user_id
            ],
        )?;
        Ok(())
    })
}

pub fn delete_goal(pool: &DbPool, user_id: &str, id: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let n = conn.execute(
            "DELETE FROM goals WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(n > 0)
    })
}
