use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    pub list_id: i64,
    pub created_at: OffsetDateTime,
}

impl Reminder {
    /// Items of a list, most recent first.
    pub async fn for_list(db: &PgPool, list_id: i64) -> Result<Vec<Reminder>, AppError> {
        let items = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT id, title, list_id, created_at
            FROM reminders
            WHERE list_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(list_id)
        .fetch_all(db)
        .await?;
        Ok(items)
    }

    pub async fn create(db: &PgPool, list_id: i64, title: &str) -> Result<Reminder, AppError> {
        let item = sqlx::query_as::<_, Reminder>(
            r#"
            INSERT INTO reminders (title, list_id)
            VALUES ($1, $2)
            RETURNING id, title, list_id, created_at
            "#,
        )
        .bind(title)
        .bind(list_id)
        .fetch_one(db)
        .await?;
        Ok(item)
    }

    /// Retitle an item. The ownership check rides along in the statement:
    /// only items whose parent list belongs to `owner_id` can match, so a
    /// forged id from another user's list is a no-op. Returns whether a
    /// row changed.
    pub async fn update(
        db: &PgPool,
        item_id: i64,
        owner_id: Uuid,
        title: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE reminders
            SET title = $1
            WHERE id = $2
              AND list_id IN (SELECT id FROM lists WHERE user_id = $3)
            "#,
        )
        .bind(title)
        .bind(item_id)
        .bind(owner_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an item, with the same ownership gate as `update`.
    pub async fn delete(db: &PgPool, item_id: i64, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE id = $1
              AND list_id IN (SELECT id FROM lists WHERE user_id = $2)
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::User;
    use crate::lists::repo::List;

    async fn owned_list(db: &PgPool, username: &str, name: &str) -> (User, List) {
        let user = User::create(db, username, "irrelevant-hash").await.unwrap();
        let list = List::create(db, user.id, name).await.unwrap();
        (user, list)
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn items_come_back_most_recent_first(db: PgPool) {
        let (_, list) = owned_list(&db, "a@example.com", "Groceries").await;

        Reminder::create(&db, list.id, "Milk").await.unwrap();
        Reminder::create(&db, list.id, "Eggs").await.unwrap();

        let items = Reminder::for_list(&db, list.id).await.unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Eggs", "Milk"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_changes_only_the_target_row(db: PgPool) {
        let (owner, list) = owned_list(&db, "a@example.com", "Today").await;
        let milk = Reminder::create(&db, list.id, "Milk").await.unwrap();
        let eggs = Reminder::create(&db, list.id, "Eggs").await.unwrap();

        assert!(Reminder::update(&db, milk.id, owner.id, "Oat milk")
            .await
            .unwrap());

        let items = Reminder::for_list(&db, list.id).await.unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Eggs", "Oat milk"]);

        // a missing id is a no-op, not an error
        assert!(!Reminder::update(&db, eggs.id + 1000, owner.id, "nope")
            .await
            .unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_and_delete_ignore_other_users_items(db: PgPool) {
        let (alice, list) = owned_list(&db, "alice@example.com", "Private").await;
        let mallory = User::create(&db, "mallory@example.com", "irrelevant-hash")
            .await
            .unwrap();
        let item = Reminder::create(&db, list.id, "Secret").await.unwrap();

        // a forged item id from someone else's list is a no-op
        assert!(!Reminder::update(&db, item.id, mallory.id, "hacked")
            .await
            .unwrap());
        assert!(!Reminder::delete(&db, item.id, mallory.id).await.unwrap());

        let items = Reminder::for_list(&db, list.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Secret");

        // the owner still can
        assert!(Reminder::delete(&db, item.id, alice.id).await.unwrap());
        assert!(Reminder::for_list(&db, list.id).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete_removes_exactly_one_row(db: PgPool) {
        let (owner, list) = owned_list(&db, "a@example.com", "Today").await;
        let milk = Reminder::create(&db, list.id, "Milk").await.unwrap();
        Reminder::create(&db, list.id, "Eggs").await.unwrap();

        assert!(Reminder::delete(&db, milk.id, owner.id).await.unwrap());

        let items = Reminder::for_list(&db, list.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Eggs");

        // deleting the same id again is a no-op
        assert!(!Reminder::delete(&db, milk.id, owner.id).await.unwrap());
    }
}
