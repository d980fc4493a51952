/*
 * Responsibility
 * - dashboard 用の利用統計 (1 クエリで集計する)
 * - キャッシュしない。リクエスト毎に都度集計
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UsageRow {
    #[sqlx(rename = "totalSamples")]
    pub total_samples: i64,

    #[sqlx(rename = "totalWords")]
    pub total_words: i64,

    #[sqlx(rename = "recentSamples")]
    pub recent_samples: i64,

    #[sqlx(rename = "lastSampleAt")]
    pub last_sample_at: Option<DateTime<Utc>>,
}

pub async fn usage_for_author(pool: &PgPool, author_id: Uuid) -> anyhow::Result<UsageRow> {
    let row = sqlx::query_as::<_, UsageRow>(
        r#"
        SELECT
            COUNT(*)                            AS "totalSamples",
            COALESCE(SUM("wordCount"), 0)::bigint AS "totalWords",
            COUNT(*) FILTER (
                WHERE "createdAt" >= now() - interval '7 days'
            )                                   AS "recentSamples",
            MAX("createdAt")                    AS "lastSampleAt"
        FROM samples
        WHERE "authorId" = $1
        "#,
    )
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
