//! Sprint management.

pub mod model;

use crate::error::{StrideError, StrideResult};
use crate::goal::{validate_date, LIST_TTL_SECS};
use model::{Sprint, SprintStatus};
use stride_cache::client::list_key;
use stride_cache::Cache;
use stride_db::queries::sprints as queries;
use stride_db::queries::sprints::SprintRow;
use stride_db::DbPool;
use uuid::Uuid;

/// Partial update for a sprint. Outer None leaves a field untouched;
/// `goal_id: Some(None)` detaches the sprint from its goal.
#[derive(Debug, Default, Clone)]
pub struct SprintUpdate {
    pub goal_id: Option<Option<String>>,
    pub title: Option<String>,
    pub starts_on: Option<String>,
    pub ends_on: Option<String>,
    pub status: Option<String>,
}

fn validate_window(starts_on: &str, ends_on: &str) -> StrideResult<()> {
    validate_date("starts_on", starts_on)?;
    validate_date("ends_on", ends_on)?;
    // Dates are YYYY-MM-DD, so string order is date order
    if ends_on < starts_on {
        return Err(StrideError::validation("ends_on must not precede starts_on"));
    }
    Ok(())
}

async fn validate_goal_link(pool: &DbPool, user_id: &str, goal_id: &str) -> StrideResult<()> {
    crate::goal::get_goal(pool, user_id, goal_id)
        .await
        .map_err(|_| StrideError::validation(format!("Unknown goal: {}", goal_id)))?;
    Ok(())
}

/// Create a new sprint.
pub async fn create_sprint(
    pool: &DbPool,
    cache: &Cache,
    user_id: &str,
    title: &str,
    goal_id: Option<&str>,
    starts_on: &str,
    ends_on: &str,
) -> StrideResult<Sprint> {
    if title.trim().is_empty() {
        return Err(StrideError::validation("Title must not be empty"));
    }
    validate_window(starts_on, ends_on)?;
    if let Some(goal_id) = goal_id {
        validate_goal_link(pool, user_id, goal_id).await?;
    }

    let id = Uuid::new_v4().to_string();
    let row = queries::create_sprint(pool, &id, user_id, goal_id, title.trim(), starts_on, ends_on)?;

    cache.invalidate(&list_key(user_id, "sprints")).await;
    Ok(Sprint::from_row(row))
}

/// Get a sprint by ID. Other users' sprints surface as not found.
pub async fn get_sprint(pool: &DbPool, user_id: &str, id: &str) -> StrideResult<Sprint> {
    let row = queries::get_sprint(pool, user_id, id)?
        .ok_or_else(|| StrideError::SprintNotFound(id.to_string()))?;
    Ok(Sprint::from_row(row))
}

/// List all sprints for a user, cache-aside with fallback to the store.
pub async fn list_sprints(pool: &DbPool, cache: &Cache, user_id: &str) -> StrideResult<Vec<Sprint>> {
    let key = list_key(user_id, "sprints");

    if let Some(rows) = cache.get_json::<Vec<SprintRow>>(&key).await {
        return Ok(rows.into_iter().map(Sprint::from_row).collect());
    }

    let rows = queries::list_sprints(pool, user_id)?;
    cache.put_json(&key, &rows, LIST_TTL_SECS).await;
    Ok(rows.into_iter().map(Sprint::from_row).collect())
}

/// Apply a partial update to a sprint.
pub async fn update_sprint(
    pool: &DbPool,
    cache: &Cache,
    user_id: &str,
    id: &str,
    update: SprintUpdate,
) -> StrideResult<Sprint> {
    let mut row = queries::get_sprint(pool, user_id, id)?
        .ok_or_else(|| StrideError::SprintNotFound(id.to_string()))?;

    if let Some(title) = update.title {
        if title.trim().is_empty() {
            return Err(StrideError::validation("Title must not be empty"));
        }
        row.title = title.trim().to_string();
    }
    if let Some(goal_id) = update.goal_id {
        if let Some(goal_id) = &goal_id {
            validate_goal_link(pool, user_id, goal_id).await?;
        }
        row.goal_id = goal_id;
    }
    if let Some(starts_on) = update.starts_on {
        row.starts_on = starts_on;
    }
    if let Some(ends_on) = update.ends_on {
        row.ends_on = ends_on;
    }
    validate_window(&row.starts_on, &row.ends_on)?;
    if let Some(status) = update.status {
        let parsed = SprintStatus::parse(&status)
            .ok_or_else(|| StrideError::validation(format!("Unknown sprint status '{}'", status)))?;
        row.status = parsed.as_str().to_string();
    }
    row.updated_at = chrono::Utc::now().to_rfc3339();

    queries::update_sprint(pool, &row)?;
    cache.invalidate(&list_key(user_id, "sprints")).await;
    Ok(Sprint::from_row(row))
}

/// Delete a sprint. Tasks that referenced it are kept (FK sets null).
pub async fn delete_sprint(pool: &DbPool, cache: &Cache, user_id: &str, id: &str) -> StrideResult<()> {
    if !queries::delete_sprint(pool, user_id, id)? {
        return Err(StrideError::SprintNotFound(id.to_string()));
    }
    cache.invalidate(&list_key(user_id, "sprints")).await;
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
    async fn crud_round_trip() {
        let (pool, cache, user_id) = setup().await;

        let sprint = create_sprint(
            &pool, &cache, &user_id, "Week 1", None, "2026-01-05", "2026-01-11",
        )
        .await
        .unwrap();
        assert_eq!(sprint.status, SprintStatus::Planned);

        let updated = update_sprint(
            &pool,
            &cache,
            &user_id,
            &sprint.id,
            SprintUpdate { status: Some("active".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, SprintStatus::Active);

        assert_eq!(list_sprints(&pool, &cache, &user_id).await.unwrap().len(), 1);

        delete_sprint(&pool, &cache, &user_id, &sprint.id).await.unwrap();
        assert!(matches!(
            get_sprint(&pool, &user_id, &sprint.id).await,
            Err(StrideError::SprintNotFound(_))
        ));
    }

    #[tokio::test]
    async fn date_window_is_validated() {
        let (pool, cache, user_id) = setup().await;

        assert!(matches!(
            create_sprint(&pool, &cache, &user_id, "Backwards", None, "2026-01-11", "2026-01-05").await,
            Err(StrideError::ValidationError(_))
        ));
        assert!(matches!(
            create_sprint(&pool, &cache, &user_id, "Bad date", None, "soon", "2026-01-05").await,
            Err(StrideError::ValidationError(_))
        ));

        // Shrinking the window below the start date is caught on update too
        let sprint = create_sprint(
            &pool, &cache, &user_id, "Week 1", None, "2026-01-05", "2026-01-11",
        )
        .await
        .unwrap();
        assert!(matches!(
            update_sprint(
                &pool,
                &cache,
                &user_id,
                &sprint.id,
                SprintUpdate { ends_on: Some("2026-01-01".to_string()), ..Default::default() },
            )
            .await,
            Err(StrideError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn explicit_null_detaches_goal() {
        let (pool, cache, user_id) = setup().await;
        let goal = crate::goal::create_goal(&pool, &cache, &user_id, "Goal", None, None)
            .await
            .unwrap();
        let sprint = create_sprint(
            &pool, &cache, &user_id, "Week 1", Some(&goal.id), "2026-01-05", "2026-01-11",
        )
        .await
        .unwrap();
        assert!(sprint.goal_id.is_some());

        let detached = update_sprint(
            &pool,
            &cache,
            &user_id,
            &sprint.id,
            SprintUpdate { goal_id: Some(None), ..Default::default() },
        )
        .await
        .unwrap();
        assert!(detached.goal_id.is_none());
    }

    #[tokio::test]
    async fn goal_link_must_belong_to_user() {
        let (pool, cache, user_id) = setup().await;
        let other = crate::user::register(&pool, "bob@example.com", "correcthorse", None)
            .await
            .unwrap();
        let foreign_goal = crate::goal::create_goal(&pool, &cache, &other.user.id, "Theirs", None, None)
            .await
            .unwrap();

        assert!(matches!(
            create_sprint(
                &pool, &cache, &user_id, "Sprint", Some(&foreign_goal.id), "2026-01-05", "2026-01-11",
            )
            .await,
            Err(StrideError::ValidationError(_))
        ));
    }
}
