/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - トークン検証のロジックは middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 */

use uuid::Uuid;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は内部ユーザーID (UUID)。samples の authorId スコープに使う
/// - `jti` は監査/相関用（denylist 等は必要になった時点で追加）
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub jti: Option<String>,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, jti: Option<String>) -> Self {
        Self { user_id, jti }
    }
}
