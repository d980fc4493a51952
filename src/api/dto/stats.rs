/*
 * Responsibility
 * - dashboard 利用統計の response DTO
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatsResponse {
    pub total_samples: i64,
    pub total_words: i64,
    /// 直近 7 日間に作成された数
    pub samples_last_week: i64,
    pub last_sample_at: Option<DateTime<Utc>>,
}
