/*
 * Responsibility
 * - users テーブルの read/write
 * - email の一意制約違反は Ok(None) に写す (handler 側で 409 にする)
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,

    pub email: String,

    #[sqlx(rename = "userName")]
    pub user_name: String,

    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Insert a new user. Returns None when the email is already taken.
pub async fn create(
    pool: &PgPool,
    email: &str,
    user_name: &str,
    password_hash: &str,
) -> anyhow::Result<Option<UserRow>> {
    let result = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, "userName", "passwordHash")
        VALUES ($1, $2, $3)
        RETURNING
            id, email, "userName", "passwordHash", "createdAt"
        "#,
    )
    .bind(email)
    .bind(user_name)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(Some(row)),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_by_email(pool: &PgPool, email: &str) -> anyhow::Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT
            id, email, "userName", "passwordHash", "createdAt"
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
