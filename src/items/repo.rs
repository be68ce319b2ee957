use sqlx::PgPool;
use uuid::Uuid;

use crate::items::repo_types::{ClothingItem, Weather};

impl ClothingItem {
    /// All items, newest first, with likes aggregated from the join table.
    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<ClothingItem>> {
        sqlx::query_as::<_, ClothingItem>(
            r#"
            SELECT i.id, i.name, i.weather, i.image_url, i.owner, i.created_at,
                   COALESCE(ARRAY_AGG(l.user_id) FILTER (WHERE l.user_id IS NOT NULL), '{}') AS likes
            FROM items i
            LEFT JOIN item_likes l ON l.item_id = i.id
            GROUP BY i.id
            ORDER BY i.created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<ClothingItem>> {
        sqlx::query_as::<_, ClothingItem>(
            r#"
            SELECT i.id, i.name, i.weather, i.image_url, i.owner, i.created_at,
                   COALESCE(ARRAY_AGG(l.user_id) FILTER (WHERE l.user_id IS NOT NULL), '{}') AS likes
            FROM items i
            LEFT JOIN item_likes l ON l.item_id = i.id
            WHERE i.id = $1
            GROUP BY i.id
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        weather: Weather,
        image_url: &str,
        owner: Uuid,
    ) -> sqlx::Result<ClothingItem> {
        sqlx::query_as::<_, ClothingItem>(
            r#"
            INSERT INTO items (name, weather, image_url, owner)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, weather, image_url, owner, created_at,
                      ARRAY[]::UUID[] AS likes
            "#,
        )
        .bind(name)
        .bind(weather)
        .bind(image_url)
        .bind(owner)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Idempotent set-add: re-liking an already liked item is a no-op. The
    /// EXISTS guard keeps a like for a vanished item from violating the FK.
    pub async fn add_like(db: &PgPool, item_id: Uuid, user_id: Uuid) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO item_likes (item_id, user_id)
            SELECT $1, $2
            WHERE EXISTS (SELECT 1 FROM items WHERE id = $1)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Idempotent set-remove: unliking as a non-liker is a no-op.
    pub async fn remove_like(db: &PgPool, item_id: Uuid, user_id: Uuid) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM item_likes WHERE item_id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
