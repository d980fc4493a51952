/*
 * Responsibility
 * - 認証まわりの service 集約
 *   - access_jwt: トークン検証
 *   - gate: (path, header) → Allow/Deny の判定
 *   - token_issuer: 発行と refresh
 *   - session: cookie の発行とクリア
 */
pub mod access_jwt;
pub mod gate;
pub mod session;
pub mod token_issuer;
