//! User accounts and session auth.

pub mod model;

use crate::error::{StrideError, StrideResult};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use model::{AuthenticatedUser, User};
use stride_db::queries::{sessions, users};
use stride_db::DbPool;
use uuid::Uuid;

/// Sessions live for 30 days; expired rows are purged opportunistically on login.
const SESSION_TTL_DAYS: i64 = 30;

const MIN_PASSWORD_LEN: usize = 8;

fn hash_password(password: &str) -> StrideResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StrideError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

fn validate_registration(email: &str, password: &str) -> StrideResult<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') {
        return Err(StrideError::validation("Invalid email address"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(StrideError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Register a new account and issue a session token.
pub async fn register(
    pool: &DbPool,
    email: &str,
    password: &str,
    display_name: Option<&str>,
) -> StrideResult<AuthenticatedUser> {
    validate_registration(email, password)?;
    let email = email.trim().to_lowercase();

    if users::get_user_by_email(pool, &email)?.is_some() {
        return Err(StrideError::EmailTaken(email));
    }

    let hash = hash_password(password)?;
    let id = Uuid::new_v4().to_string();
    let row = users::create_user(pool, &id, &email, &hash, display_name)?;

    let token = issue_session(pool, &row.id)?;
    tracing::info!(user_id = %row.id, "registered user");

    Ok(AuthenticatedUser {
        user: User::from_row(row),
        token,
    })
}

/// Verify credentials and issue a session token.
pub async fn login(pool: &DbPool, email: &str, password: &str) -> StrideResult<AuthenticatedUser> {
    sessions::purge_expired(pool)?;

    let email = email.trim().to_lowercase();
    let row = users::get_user_by_email(pool, &email)?.ok_or(StrideError::InvalidCredentials)?;

    if !verify_password(password, &row.password_hash) {
        return Err(StrideError::InvalidCredentials);
    }

    let token = issue_session(pool, &row.id)?;

    Ok(AuthenticatedUser {
        user: User::from_row(row),
        token,
    })
}

/// Invalidate a session token. Idempotent: logging out a token that is
/// already gone succeeds.
pub async fn logout(pool: &DbPool, token: &str) -> StrideResult<()> {
    sessions::delete_session(pool, token)?;
    Ok(())
}

/// Resolve a bearer token to its user. Expired sessions are deleted on sight.
pub async fn authenticate(pool: &DbPool, token: &str) -> StrideResult<User> {
    let session = sessions::get_session(pool, token)?.ok_or(StrideError::InvalidToken)?;

    let expired = chrono::DateTime::parse_from_rfc3339(&session.expires_at)
        .map(|t| t < chrono::Utc::now())
        .unwrap_or(true);
    if expired {
        sessions::delete_session(pool, token)?;
        return Err(StrideError::InvalidToken);
    }

    let row = users::get_user(pool, &session.user_id)?.ok_or(StrideError::InvalidToken)?;
    Ok(User::from_row(row))
}

fn issue_session(pool: &DbPool, user_id: &str) -> StrideResult<String> {
    let token = Uuid::new_v4().to_string();
    sessions::create_session(pool, &token, user_id, chrono::Duration::days(SESSION_TTL_DAYS))?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_db::migrations::run_migrations;

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    #[tokio::test]
    async fn register_login_logout_round_trip() {
        let pool = test_pool();

        let registered = register(&pool, "ada@example.com", "correcthorse", Some("Ada"))
            .await
            .unwrap();
        assert_eq!(registered.user.email, "ada@example.com");

        let session = login(&pool, "ada@example.com", "correcthorse").await.unwrap();
        let me = authenticate(&pool, &session.token).await.unwrap();
        assert_eq!(me.id, registered.user.id);

        logout(&pool, &session.token).await.unwrap();
        assert!(matches!(
            authenticate(&pool, &session.token).await,
            Err(StrideError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let pool = test_pool();
        let registered = register(&pool, "ada@example.com", "correcthorse", None)
            .await
            .unwrap();

        logout(&pool, &registered.token).await.unwrap();
        logout(&pool, &registered.token).await.unwrap();
        logout(&pool, "never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let pool = test_pool();
        register(&pool, "ada@example.com", "correcthorse", None)
            .await
            .unwrap();

        assert!(matches!(
            login(&pool, "ada@example.com", "wronghorse").await,
            Err(StrideError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&pool, "nobody@example.com", "correcthorse").await,
            Err(StrideError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let pool = test_pool();
        register(&pool, "ada@example.com", "correcthorse", None)
            .await
            .unwrap();

        assert!(matches!(
            register(&pool, "Ada@Example.com", "otherpassword", None).await,
            Err(StrideError::EmailTaken(_))
        ));
    }

    #[tokio::test]
    async fn registration_is_validated() {
        let pool = test_pool();
        assert!(matches!(
            register(&pool, "not-an-email", "correcthorse", None).await,
            Err(StrideError::ValidationError(_))
        ));
        assert!(matches!(
            register(&pool, "ada@example.com", "short", None).await,
            Err(StrideError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn expired_session_is_rejected_and_removed() {
        let pool = test_pool();
        let registered = register(&pool, "ada@example.com", "correcthorse", None)
            .await
            .unwrap();

        stride_db::queries::sessions::create_session(
            &pool,
            "stale-token",
            &registered.user.id,
            chrono::Duration::days(-1),
        )
        .unwrap();

        assert!(matches!(
            authenticate(&pool, "stale-token").await,
            Err(StrideError::InvalidToken)
        ));
        assert!(stride_db::queries::sessions::get_session(&pool, "stale-token")
            .unwrap()
            .is_none());
    }

    #[test]
    fn password_hashes_are_salted() {
        let a = hash_password("correcthorse").unwrap();
        let b = hash_password("correcthorse").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2"));
        assert!(verify_password("correcthorse", &a));
        assert!(!verify_password("wronghorse", &a));
    }
}
