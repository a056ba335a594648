//! Sprint queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintRow {
    pub id: String,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub title: String,
    pub starts_on: String,
    pub ends_on: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SprintRow> {
    Ok(SprintRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        goal_id: row.get(2)?,
        title: row.get(3)?,
        starts_on: row.get(4)?,
        ends_on: row.get(5)?,
        status: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const COLUMNS: &str =
    "id, user_id, goal_id, title, starts_on, ends_on, status, created_at, updated_at";

#[allow(clippy::too_many_arguments)]
pub fn create_sprint(
    pool: &DbPool,
    id: &str,
    user_id: &str,
    goal_id: Option<&str>,
    title: &str,
    starts_on: &str,
    ends_on: &str,
) -> DbResult<SprintRow> {
    let now = chrono::Utc::now().to_rfc3339();
    let row = SprintRow {
        id: id.to_string(),
        user_id: user_id.to_string(),
        goal_id: goal_id.map(str::to_string),
        title: title.to_string(),
        starts_on: starts_on.to_string(),
        ends_on: ends_on.to_string(),
        status: "planned".to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO sprints (id, user_id, goal_id, title, starts_on, ends_on, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.id,
                row.user_id,
                row.goal_id,
                row.title,
                row.starts_on,
                row.ends_on,
                row.status,
                row.created_at,
                row.updated_at
            ],
        )?;
        Ok(())
    })?;
    Ok(row)
}

pub fn get_sprint(pool: &DbPool, user_id: &str, id: &str) -> DbResult<Option<SprintRow>> {
    pool.with_conn(|conn| {
        let sprint = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM sprints WHERE id = ?1 AND user_id = ?2"),
                [id, user_id],
                map_row,
            )
            .optional()?;
        Ok(sprint)
    })
}

pub fn list_sprints(pool: &DbPool, user_id: &str) -> DbResult<Vec<SprintRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM sprints WHERE user_id = ?1 ORDER BY starts_on"
        ))?;
        let rows = stmt
            .query_map([user_id], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}

pub fn update_sprint(pool: &DbPool, row: &SprintRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "UPDATE sprints SET goal_id = ?1, title = ?2, starts_on = ?3, ends_on = ?4, status = ?5, updated_at = ?6
             WHERE id = ?7 AND user_id = ?8",
            rusqlite::params![
                row.goal_id,
                row.title,
                row.starts_on,
                row.ends_on,
                row.status,
                row.updated_at,
                row.id,
                row.user_id
            ],
        )?;
        Ok(())
    })
}

pub fn delete_sprint(pool: &DbPool, user_id: &str, id: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let n = conn.execute(
            "DELETE FROM sprints WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(n > 0)
    })
}
