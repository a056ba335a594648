//! Goal management.

pub mod model;

use crate::error::{StrideError, StrideResult};
use model::{Goal, GoalStatus};
use stride_cache::client::list_key;
use stride_cache::Cache;
use stride_db::queries::goals as queries;
use stride_db::queries::goals::GoalRow;
use stride_db::DbPool;
use uuid::Uuid;

/// TTL for cached per-user lists.
pub(crate) const LIST_TTL_SECS: u64 = 60;

/// Partial update for a goal. Outer None leaves a field untouched;
/// `Some(None)` clears a nullable one.
#[derive(Debug, Default, Clone)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub target_date: Option<Option<String>>,
}

fn validate_title(title: &str) -> StrideResult<()> {
    if title.trim().is_empty() {
        return Err(StrideError::validation("Title must not be empty"));
    }
    Ok(())
}

pub(crate) fn validate_date(field: &str, value: &str) -> StrideResult<()> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| StrideError::validation(format!("{} must be a YYYY-MM-DD date", field)))
}

/// Create a new goal.
pub async fn create_goal(
    pool: &DbPool,
    cache: &Cache,
    user_id: &str,
    title: &str,
    description: Option<&str>,
    target_date: Option<&str>,
) -> StrideResult<Goal> {
    validate_title(title)?;
    if let Some(date) = target_date {
        validate_date("target_date", date)?;
    }

    let id = Uuid::new_v4().to_string();
    let row = queries::create_goal(pool, &id, user_id, title.trim(), description, target_date)?;

    cache.invalidate(&list_key(user_id, "goals")).await;
    Ok(Goal::from_row(row))
}

/// Get a goal by ID. Other users' goals surface as not found.
pub async fn get_goal(pool: &DbPool, user_id: &str, id: &str) -> StrideResult<Goal> {
    let row = queries::get_goal(pool, user_id, id)?
        .ok_or_else(|| StrideError::GoalNotFound(id.to_string()))?;
    Ok(Goal::from_row(row))
}

/// List all goals for a user, cache-aside with fallback to the store.
pub async fn list_goals(pool: &DbPool, cache: &Cache, user_id: &str) -> StrideResult<Vec<Goal>> {
    let key = list_key(user_id, "goals");

    if let Some(rows) = cache.get_json::<Vec<GoalRow>>(&key).await {
        return Ok(rows.into_iter().map(Goal::from_row).collect());
    }

    let rows = queries::list_goals(pool, user_id)?;
    cache.put_json(&key, &rows, LIST_TTL_SECS).await;
    Ok(rows.into_iter().map(Goal::from_row).collect())
}

/// Apply a partial update to a goal.
pub async fn update_goal(
    pool: &DbPool,
    cache: &Cache,
    user_id: &str,
    id: &str,
    update: GoalUpdate,
) -> StrideResult<Goal> {
    let mut row = queries::get_goal(pool, user_id, id)?
        .ok_or_else(|| StrideError::GoalNotFound(id.to_string()))?;

    if let Some(title) = update.title {
        validate_title(&title)?;
        row.title = title.trim().to_string();
    }
    if let Some(description) = update.description {
        row.description = description;
    }
    if let Some(status) = update.status {
        let parsed = GoalStatus::parse(&status)
            .ok_or_else(|| StrideError::validation(format!("Unknown goal status '{}'", status)))?;
        row.status = parsed.as_str().to_string();
    }
    if let Some(date) = update.target_date {
        if let Some(date) = &date {
            validate_date("target_date", date)?;
        }
        row.target_date = date;
    }
    row.updated_at = chrono::Utc::now().to_rfc3339();

    queries::update_goal(pool, &row)?;
    cache.invalidate(&list_key(user_id, "goals")).await;
    Ok(Goal::from_row(row))
}

/// Delete a goal. Sprints and tasks that referenced it are kept (FK sets null).
pub async fn delete_goal(pool: &DbPool, cache: &Cache, user_id: &str, id: &str) -> StrideResult<()> {
    if !queries::delete_goal(pool, user_id, id)? {
        return Err(StrideError::GoalNotFound(id.to_string()));
    }
    cache.invalidate(&list_key(user_id, "goals")).await;
    Ok(())
}

/// Overwrite a goal's description with regenerated scope text.
pub(crate) async fn set_goal_description(
    pool: &DbPool,
    cache: &Cache,
    user_id: &str,
    id: &str,
    description: &str,
) -> StrideResult<Goal> {
    let mut row = queries::get_goal(pool, user_id, id)?
        .ok_or_else(|| StrideError::GoalNotFound(id.to_string()))?;
    row.description = Some(description.to_string());
    row.updated_at = chrono::Utc::now().to_rfc3339();
    queries::update_goal(pool, &row)?;
    cache.invalidate(&list_key(user_id, "goals")).await;
    Ok(Goal::from_row(row))
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
    async fn crud_round_trip_without_cache() {
        let (pool, cache, user_id) = setup().await;

        let goal = create_goal(&pool, &cache, &user_id, "Run a marathon", None, Some("2026-10-01"))
            .await
            .unwrap();
        assert_eq!(goal.status, GoalStatus::Active);

        let listed = list_goals(&pool, &cache, &user_id).await.unwrap();
        assert_eq!(listed.len(), 1);

        let updated = update_goal(
            &pool,
            &cache,
            &user_id,
            &goal.id,
            GoalUpdate {
                status: Some("completed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, GoalStatus::Completed);

        delete_goal(&pool, &cache, &user_id, &goal.id).await.unwrap();
        assert!(matches!(
            get_goal(&pool, &user_id, &goal.id).await,
            Err(StrideError::GoalNotFound(_))
        ));
    }

    #[tokio::test]
    async fn other_users_goals_are_invisible() {
        let (pool, cache, user_id) = setup().await;
        let other = crate::user::register(&pool, "bob@example.com", "correcthorse", None)
            .await
            .unwrap();

        let goal = create_goal(&pool, &cache, &user_id, "Private goal", None, None)
            .await
            .unwrap();

        assert!(matches!(
            get_goal(&pool, &other.user.id, &goal.id).await,
            Err(StrideError::GoalNotFound(_))
        ));
        assert!(matches!(
            delete_goal(&pool, &cache, &other.user.id, &goal.id).await,
            Err(StrideError::GoalNotFound(_))
        ));
        assert!(list_goals(&pool, &cache, &other.user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_rejects_bad_input() {
        let (pool, cache, user_id) = setup().await;

        assert!(matches!(
            create_goal(&pool, &cache, &user_id, "  ", None, None).await,
            Err(StrideError::ValidationError(_))
        ));
        assert!(matches!(
            create_goal(&pool, &cache, &user_id, "Goal", None, Some("next tuesday")).await,
            Err(StrideError::ValidationError(_))
        ));

        let goal = create_goal(&pool, &cache, &user_id, "Goal", None, None).await.unwrap();
        assert!(matches!(
            update_goal(
                &pool,
                &cache,
                &user_id,
                &goal.id,
                GoalUpdate { status: Some("paused".to_string()), ..Default::default() },
            )
            .await,
            Err(StrideError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn explicit_null_clears_optional_fields() {
        let (pool, cache, user_id) = setup().await;
        let goal = create_goal(
            &pool, &cache, &user_id, "Goal", Some("The scope"), Some("2026-10-01"),
        )
        .await
        .unwrap();

        let cleared = update_goal(
            &pool,
            &cache,
            &user_id,
            &goal.id,
            GoalUpdate {
                description: Some(None),
                target_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(cleared.description.is_none());
        assert!(cleared.target_date.is_none());

        // A request that omits the fields leaves them alone
        let untouched = update_goal(
            &pool,
            &cache,
            &user_id,
            &goal.id,
            GoalUpdate { title: Some("Renamed".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
        assert!(untouched.description.is_none());
        assert_eq!(untouched.title, "Renamed");
    }

    #[test]
    fn status_parsing() {
        assert_eq!(GoalStatus::parse("archived"), Some(GoalStatus::Archived));
        assert_eq!(GoalStatus::parse("bogus"), None);
        assert_eq!(GoalStatus::from_str("bogus"), GoalStatus::Active);
        assert_eq!(GoalStatus::Completed.as_str(), "completed");
    }
}
