use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::password::OAUTH_PASSWORD_SENTINEL;
use crate::error::AppError;

/// User record in the database. Usernames are email addresses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new user. A unique violation on `username` maps to
    /// `DuplicateUser`.
    pub async fn create(db: &PgPool, username: &str, password_hash: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateUser;
                }
            }
            AppError::Database(e)
        })?;
        Ok(user)
    }

    /// Look up the account for an externally verified email, creating it
    /// with the sentinel password marker on first sign-in. The second
    /// sign-in with the same email reuses the row.
    pub async fn find_or_create_oauth(db: &PgPool, email: &str) -> Result<User, AppError> {
        if let Some(user) = Self::find_by_username(db, email).await? {
            return Ok(user);
        }
        Self::create(db, email, OAUTH_PASSWORD_SENTINEL).await
    }
}
