use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::User;

impl User {
    /// Find a user by email, including the password hash for verification.
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, avatar, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, avatar, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with a hashed password.
    pub async fn create(
        db: &PgPool,
        name: &str,
        avatar: &str,
        email: &str,
        password_hash: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, avatar, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, avatar, email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(avatar)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    /// Update only the supplied profile fields. Name and avatar are the only
    /// mutable columns.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        avatar: Option<&str>,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name), avatar = COALESCE($3, avatar)
            WHERE id = $1
            RETURNING id, name, avatar, email, password_hash, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(avatar)
        .fetch_optional(db)
        .await
    }
}
