//! Task management.

pub mod model;

use crate::error::{StrideError, StrideResult};
use crate::goal::LIST_TTL_SECS;
use model::{Priority, Task, TaskStatus};
use stride_cache::client::list_key;
use stride_cache::Cache;
use stride_db::queries::tasks as queries;
use stride_db::queries::tasks::TaskRow;
use stride_db::DbPool;
use uuid::Uuid;

/// Partial update for a task. Outer None leaves a field untouched;
/// `Some(None)` clears a nullable one (detaching the goal or sprint link).
#[derive(Debug, Default, Clone)]
pub struct TaskUpdate {
    pub goal_id: Option<Option<String>>,
    pub sprint_id: Option<Option<String>>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

fn validate_title(title: &str) -> StrideResult<()> {
    if title.trim().is_empty() {
        return Err(StrideError::validation("Title must not be empty"));
    }
    Ok(())
}

async fn validate_links(
    pool: &DbPool,
    user_id: &str,
    goal_id: Option<&str>,
    sprint_id: Option<&str>,
) -> StrideResult<()> {
    if let Some(goal_id) = goal_id {
        crate::goal::get_goal(pool, user_id, goal_id)
            .await
            .map_err(|_| StrideError::validation(format!("Unknown goal: {}", goal_id)))?;
    }
    if let Some(sprint_id) = sprint_id {
        crate::sprint::get_sprint(pool, user_id, sprint_id)
            .await
            .map_err(|_| StrideError::validation(format!("Unknown sprint: {}", sprint_id)))?;
    }
    Ok(())
}

/// Create a new task.
#[allow(clippy::too_many_arguments)]
pub async fn create_task(
    pool: &DbPool,
    cache: &Cache,
    user_id: &str,
    title: &str,
    description: Option<&str>,
    goal_id: Option<&str>,
    sprint_id: Option<&str>,
    priority: Option<&str>,
) -> StrideResult<Task> {
    validate_title(title)?;
    validate_links(pool, user_id, goal_id, sprint_id).await?;

    let priority = match priority {
        Some(p) => Priority::parse(p)
            .ok_or_else(|| StrideError::validation(format!("Unknown priority '{}'", p)))?,
        None => Priority::Medium,
    };

    let id = Uuid::new_v4().to_string();
    let row = queries::create_task(
        pool,
        &id,
        user_id,
        goal_id,
        sprint_id,
        title.trim(),
        description,
        priority.as_str(),
    )?;

    cache.invalidate(&list_key(user_id, "tasks")).await;
    Ok(Task::from_row(row))
}

/// Get a task by ID. Other users' tasks surface as not found.
pub async fn get_task(pool: &DbPool, user_id: &str, id: &str) -> StrideResult<Task> {
    let row = queries::get_task(pool, user_id, id)?
        .ok_or_else(|| StrideError::TaskNotFound(id.to_string()))?;
    Ok(Task::from_row(row))
}

/// List all tasks for a user, cache-aside with fallback to the store.
pub async fn list_tasks(pool: &DbPool, cache: &Cache, user_id: &str) -> StrideResult<Vec<Task>> {
    let key = list_key(user_id, "tasks");

    if let Some(rows) = cache.get_json::<Vec<TaskRow>>(&key).await {
        return Ok(rows.into_iter().map(Task::from_row).collect());
    }

    let rows = queries::list_tasks(pool, user_id)?;
    cache.put_json(&key, &rows, LIST_TTL_SECS).await;
    Ok(rows.into_iter().map(Task::from_row).collect())
}

/// List tasks attached to a goal (uncached; used by the AI suggesters).
pub async fn list_tasks_by_goal(
    pool: &DbPool,
    user_id: &str,
    goal_id: &str,
) -> StrideResult<Vec<Task>> {
    let rows = queries::list_tasks_by_goal(pool, user_id, goal_id)?;
    Ok(rows.into_iter().map(Task::from_row).collect())
}

/// Apply a partial update to a task.
///
/// Moving to done stamps `completed_at`; moving out of done clears it.
pub async fn update_task(
    pool: &DbPool,
    cache: &Cache,
    user_id: &str,
    id: &str,
    update: TaskUpdate,
) -> StrideResult<Task> {
    let mut row = queries::get_task(pool, user_id, id)?
        .ok_or_else(|| StrideError::TaskNotFound(id.to_string()))?;

    validate_links(
        pool,
        user_id,
        update.goal_id.as_ref().and_then(|g| g.as_deref()),
        update.sprint_id.as_ref().and_then(|s| s.as_deref()),
    )
    .await?;

    if let Some(title) = update.title {
        validate_title(&title)?;
        row.title = title.trim().to_string();
    }
    if let Some(description) = update.description {
        row.description = description;
    }
    if let Some(goal_id) = update.goal_id {
        row.goal_id = goal_id;
    }
    if let Some(sprint_id) = update.sprint_id {
        row.sprint_id = sprint_id;
    }
    if let Some(priority) = update.priority {
        let parsed = Priority::parse(&priority)
            .ok_or_else(|| StrideError::validation(format!("Unknown priority '{}'", priority)))?;
        row.priority = parsed.as_str().to_string();
    }
    if let Some(status) = update.status {
        let parsed = TaskStatus::parse(&status)
            .ok_or_else(|| StrideError::validation(format!("Unknown task status '{}'", status)))?;
        let now = chrono::Utc::now().to_rfc3339();
        match parsed {
            TaskStatus::Done => {
                if row.completed_at.is_none() {
                    row.completed_at = Some(now);
                }
            }
            _ => row.completed_at = None,
        }
        row.status = parsed.as_str().to_string();
    }
    row.updated_at = chrono::Utc::now().to_rfc3339();

    queries::update_task(pool, &row)?;
    cache.invalidate(&list_key(user_id, "tasks")).await;
    Ok(Task::from_row(row))
}

/// Delete a task.
pub async fn delete_task(pool: &DbPool, cache: &Cache, user_id: &str, id: &str) -> StrideResult<()> {
    if !queries::delete_task(pool, user_id, id)? {
        return Err(StrideError::TaskNotFound(id.to_string()));
    }
    cache.invalidate(&list_key(user_id, "tasks")).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_db::migrations::run_migrations;

    async fn setup() -> (DbPool, Cache, String) {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        let user = crate::user::register(&pool, "ada@example.com", "correcthorse", None)
            .await
            .unwrap();
        (pool, Cache::disabled(), user.user.id)
    }

    #[tokio::test]
    async fn completing_a_task_stamps_completed_at() {
        let (pool, cache, user_id) = setup().await;

        let task = create_task(&pool, &cache, &user_id, "Write tests", None, None, None, None)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.completed_at.is_none());

        let done = update_task(
            &pool,
            &cache,
            &user_id,
            &task.id,
            TaskUpdate { status: Some("done".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
        assert_eq!(done.status, TaskStatus::Done);
        assert!(done.completed_at.is_some());

        // Reopening clears the stamp
        let reopened = update_task(
            &pool,
            &cache,
            &user_id,
            &task.id,
            TaskUpdate { status: Some("todo".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
        assert!(reopened.completed_at.is_none());
    }

    #[tokio::test]
    async fn links_must_belong_to_user() {
        let (pool, cache, user_id) = setup().await;

        assert!(matches!(
            create_task(&pool, &cache, &user_id, "Task", None, Some("no-such-goal"), None, None).await,
            Err(StrideError::ValidationError(_))
        ));

        let goal = crate::goal::create_goal(&pool, &cache, &user_id, "Goal", None, None)
            .await
            .unwrap();
        let task = create_task(&pool, &cache, &user_id, "Task", None, Some(&goal.id), None, None)
            .await
            .unwrap();
        assert_eq!(task.goal_id.as_deref(), Some(goal.id.as_str()));

        let by_goal = list_tasks_by_goal(&pool, &user_id, &goal.id).await.unwrap();
        assert_eq!(by_goal.len(), 1);
    }

    #[tokio::test]
    async fn unknown_priority_is_rejected() {
        let (pool, cache, user_id) = setup().await;
        assert!(matches!(
            create_task(&pool, &cache, &user_id, "Task", None, None, None, Some("urgent")).await,
            Err(StrideError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn explicit_null_detaches_links() {
        let (pool, cache, user_id) = setup().await;
        let goal = crate::goal::create_goal(&pool, &cache, &user_id, "Goal", None, None)
            .await
            .unwrap();
        let task = create_task(&pool, &cache, &user_id, "Task", None, Some(&goal.id), None, None)
            .await
            .unwrap();
        assert!(task.goal_id.is_some());

        // Omitting goal_id leaves the link in place
        let renamed = update_task(
            &pool,
            &cache,
            &user_id,
            &task.id,
            TaskUpdate { title: Some("Renamed".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
        assert!(renamed.goal_id.is_some());

        let detached = update_task(
            &pool,
            &cache,
            &user_id,
            &task.id,
            TaskUpdate { goal_id: Some(None), ..Default::default() },
        )
        .await
        .unwrap();
        assert!(detached.goal_id.is_none());
    }

    #[tokio::test]
    async fn deleting_a_goal_detaches_tasks() {
        let (pool, cache, user_id) = setup().await;
        let goal = crate::goal::create_goal(&pool, &cache, &user_id, "Goal", None, None)
            .await
            .unwrap();
        let task = create_task(&pool, &cache, &user_id, "Task", None, Some(&goal.id), None, None)
            .await
            .unwrap();

        crate::goal::delete_goal(&pool, &cache, &user_id, &goal.id).await.unwrap();

        let task = get_task(&pool, &user_id, &task.id).await.unwrap();
        assert!(task.goal_id.is_none());
    }
}
