/*
 * Responsibility
 * - DB アクセス層 (sqlx / PgPool)
 * - SQL とカラム名の対応はこの層に閉じ込める
 */
pub mod sample_repo;
pub mod stats_repo;
pub mod user_repo;
