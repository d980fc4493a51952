/*
 * Responsibility
 * - samples (writing samples) CRUD
 * - すべて authorId でスコープする (他人の sample は存在しないのと同じ扱い)
 * - authorId の FK (CASCADE) 前提で削除挙動を意識
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SampleRow {
    #[sqlx(rename = "sampleId")]
    pub sample_id: i64,

    pub title: String,
    pub content: String,

    #[sqlx(rename = "wordCount")]
    pub word_count: i32,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list_by_author(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<SampleRow>> {
    let rows = sqlx::query_as::<_, SampleRow>(
        r#"
        SELECT
            "sampleId", title, content, "wordCount", "authorId", "createdAt", "updatedAt"
        FROM samples
        WHERE "authorId" = $1
        ORDER BY "sampleId" DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn create(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    content: &str,
    word_count: i32,
) -> anyhow::Result<SampleRow> {
    let row = sqlx::query_as::<_, SampleRow>(
        r#"
        INSERT INTO samples (title, content, "wordCount", "authorId")
        VALUES ($1, $2, $3, $4)
        RETURNING
            "sampleId", title, content, "wordCount", "authorId", "createdAt", "updatedAt"
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(word_count)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get(
    pool: &PgPool,
    author_id: Uuid,
    sample_id: i64,
) -> anyhow::Result<Option<SampleRow>> {
    let row = sqlx::query_as::<_, SampleRow>(
        r#"
        SELECT
            "sampleId", title, content, "wordCount", "authorId", "createdAt", "updatedAt"
        FROM samples
        WHERE "sampleId" = $1 AND "authorId" = $2
        "#,
    )
    .bind(sample_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    author_id: Uuid,
    sample_id: i64,
    title: Option<&str>,
    content: Option<&str>,
    word_count: Option<i32>,
) -> anyhow::Result<Option<SampleRow>> {
    let row = sqlx::query_as::<_, SampleRow>(
        r#"
        UPDATE samples
        SET
            title = COALESCE($3, title),
            content = COALESCE($4, content),
            "wordCount" = COALESCE($5, "wordCount"),
            "updatedAt" = now()
        WHERE "sampleId" = $1 AND "authorId" = $2
        RETURNING
            "sampleId", title, content, "wordCount", "authorId", "createdAt", "updatedAt"
        "#,
    )
    .bind(sample_id)
    .bind(author_id)
    .bind(title)
    .bind(content)
    .bind(word_count)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, author_id: Uuid, sample_id: i64) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM samples
        WHERE "sampleId" = $1 AND "authorId" = $2
        "#,
    )
    .bind(sample_id)
    .bind(author_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
