//! Task queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub sprint_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub created_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        goal_id: row.get(2)?,
        sprint_id: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        status: row.get(6)?,
        priority: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
        completed_at: row.get(10)?,
    })
}

const COLUMNS: &str = "id, user_id, goal_id, sprint_id, title, description, status, priority, created_at, updated_at, completed_at";

#[allow(clippy::too_many_arguments)]
pub fn create_task(
    pool: &DbPool,
    id: &str,
    user_id: &str,
    goal_id: Option<&str>,
    sprint_id: Option<&str>,
    title: &str,
    description: Option<&str>,
    priority: &str,
) -> DbResult<TaskRow> {
    let now = chrono::Utc::now().to_rfc3339();
    let row = TaskRow {
        id: id.to_string(),
        user_id: user_id.to_string(),
        goal_id: goal_id.map(str::to_string),
        sprint_id: sprint_id.map(str::to_string),
        title: title.to_string(),
        description: description.map(str::to_string),
        status: "todo".to_string(),
        priority: priority.to_string(),
        created_at: now.clone(),
        updated_at: now,
        completed_at: None,
    };
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO tasks (id, user_id, goal_id, sprint_id, title, description, status, priority, created_at, updated_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                row.id,
                row.user_id,
                row.goal_id,
                row.sprint_id,
                row.title,
                row.description,
                row.status,
                row.priority,
                row.created_at,
                row.updated_at,
                row.completed_at
            ],
        )?;
        Ok(())
    })?;
    Ok(row)
}

pub fn get_task(pool: &DbPool, user_id: &str, id: &str) -> DbResult<Option<TaskRow>> {
    pool.with_conn(|conn| {
        let task = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
                [id, user_id],
                map_row,
            )
            .optional()?;
        Ok(task)
    })
}

pub fn list_tasks(pool: &DbPool, user_id: &str) -> DbResult<Vec<TaskRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM tasks WHERE user_id = ?1 ORDER BY created_at"
        ))?;
        let rows = stmt
            .query_map([user_id], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}

pub fn list_tasks_by_goal(pool: &DbPool, user_id: &str, goal_id: &str) -> DbResult<Vec<TaskRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM tasks WHERE user_id = ?1 AND goal_id = ?2 ORDER BY created_at"
        ))?;
        let rows = stmt
            .query_map([user_id, goal_id], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}

pub fn update_task(pool: &DbPool, row: &TaskRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "UPDATE tasks SET goal_id = ?1, sprint_id = ?2, title = ?3, description = ?4, status = ?5, priority = ?6, updated_at = ?7, completed_at = ?8
             WHERE id = ?9 AND user_id = ?10",
            rusqlite::params![
                row.goal_id,
                row.sprint_id,
                row.title,
                row.description,
                row.status,
                row.priority,
                row.updated_at,
                row.completed_at,
                row.id,
                row.user_id
            ],
        )?;
        Ok(())
    })
}

pub fn delete_task(pool: &DbPool, user_id: &str, id: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let n = conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(n > 0)
    })
}
