use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

/// Name given to the list auto-created in single-list mode.
pub const DEFAULT_LIST_NAME: &str = "Today";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct List {
    pub id: i64,
    pub name: String,
    pub user_id: Uuid,
}

impl List {
    /// All lists owned by the user, most recent first.
    pub async fn for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<List>, AppError> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT id, name, user_id
            FROM lists
            WHERE user_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(lists)
    }

    pub async fn find_for_user(
        db: &PgPool,
        user_id: Uuid,
        list_id: i64,
    ) -> Result<Option<List>, AppError> {
        let list = sqlx::query_as::<_, List>(
            r#"
            SELECT id, name, user_id
            FROM lists
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(list)
    }

    pub async fn create(db: &PgPool, user_id: Uuid, name: &str) -> Result<List, AppError> {
        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, user_id
            "#,
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(list)
    }

    /// The user's default list, created on first use. Single-list mode
    /// funnels every item through this one.
    pub async fn default_for_user(db: &PgPool, user_id: Uuid) -> Result<List, AppError> {
        let existing = sqlx::query_as::<_, List>(
            r#"
            SELECT id, name, user_id
            FROM lists
            WHERE user_id = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        match existing {
            Some(list) => Ok(list),
            None => Self::create(db, user_id, DEFAULT_LIST_NAME).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::User;

    async fn user(db: &PgPool, username: &str) -> User {
        User::create(db, username, "irrelevant-hash").await.unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn lists_come_back_most_recent_first(db: PgPool) {
        let owner = user(&db, "a@example.com").await;
        assert!(List::for_user(&db, owner.id).await.unwrap().is_empty());

        let first = List::create(&db, owner.id, "Groceries").await.unwrap();
        let second = List::create(&db, owner.id, "Work").await.unwrap();

        let lists = List::for_user(&db, owner.id).await.unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].id, second.id);
        assert_eq!(lists[1].id, first.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn lists_are_scoped_to_their_owner(db: PgPool) {
        let alice = user(&db, "alice@example.com").await;
        let mallory = user(&db, "mallory@example.com").await;
        let list = List::create(&db, alice.id, "Private").await.unwrap();

        assert!(List::find_for_user(&db, alice.id, list.id)
            .await
            .unwrap()
            .is_some());
        assert!(List::find_for_user(&db, mallory.id, list.id)
            .await
            .unwrap()
            .is_none());
        assert!(List::for_user(&db, mallory.id).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn default_list_is_created_once(db: PgPool) {
        let owner = user(&db, "a@example.com").await;

        let first = List::default_for_user(&db, owner.id).await.unwrap();
        assert_eq!(first.name, DEFAULT_LIST_NAME);

        let second = List::default_for_user(&db, owner.id).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(List::for_user(&db, owner.id).await.unwrap().len(), 1);
    }
}
