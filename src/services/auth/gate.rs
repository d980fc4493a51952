//! Request gate: (path, Authorization ヘッダ) → Allow / Deny の純粋関数
//!
//! - transport (axum) に依存しないので単体でテストできる
//! - middleware 側はこの判定結果を HTTP 応答へ写すだけ

use crate::services::auth::access_jwt::{AccessJwtError, AccessTokenVerifier, VerifiedAccessToken};

/// 認証必須のパス prefix。これ以外のパスは無検査で通す。
pub const PROTECTED_PREFIX: &str = "/api/protected";

#[derive(Debug)]
pub enum GateDecision {
    /// Path is outside the protected prefix; forward untouched.
    Open,
    /// Verified bearer token; forward with the attached identity.
    Allow(VerifiedAccessToken),
    Deny(DenyReason),
}

#[derive(Debug)]
pub enum DenyReason {
    /// No `Authorization: Bearer <token>` header on a protected path.
    MissingCredentials,
    /// Verification failed; the cause stays server-side.
    InvalidToken(AccessJwtError),
}

pub fn is_protected(path: &str) -> bool {
    path == PROTECTED_PREFIX
        || path
            .strip_prefix(PROTECTED_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Evaluate the gate for one request.
///
/// `authorization` is the raw `Authorization` header value, if any.
pub fn evaluate(
    verifier: &AccessTokenVerifier,
    path: &str,
    authorization: Option<&str>,
) -> GateDecision {
    if !is_protected(path) {
        return GateDecision::Open;
    }

    let Some(header) = authorization else {
        return GateDecision::Deny(DenyReason::MissingCredentials);
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        // ヘッダはあるが Bearer 形式でない → credential 不在として扱う
        return GateDecision::Deny(DenyReason::MissingCredentials);
    };

    match verifier.verify_verified(token) {
        Ok(verified) => GateDecision::Allow(verified),
        Err(err) => GateDecision::Deny(DenyReason::InvalidToken(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::token_issuer::JwtIssuer;
    use uuid::Uuid;

    const SECRET: &[u8] = b"gate-test-secret";

    fn verifier() -> AccessTokenVerifier {
        AccessTokenVerifier::new(SECRET, "kaku", "kaku-web", 0)
    }

    fn signed_access_token(user_id: Uuid) -> String {
        let issuer = JwtIssuer::new(SECRET, "kaku".into(), "kaku-web".into(), 600, 3600);
        issuer.issue_pair(user_id).unwrap().access_token
    }

    #[test]
    fn paths_outside_the_prefix_are_open() {
        let v = verifier();
        assert!(matches!(
            evaluate(&v, "/api/auth/logout", None),
            GateDecision::Open
        ));
        assert!(matches!(evaluate(&v, "/health", None), GateDecision::Open));
        // prefix は完全一致 + '/' 区切りで見る
        assert!(matches!(
            evaluate(&v, "/api/protected-ish", Some("nonsense")),
            GateDecision::Open
        ));
    }

    #[test]
    fn protected_path_without_header_is_denied() {
        assert!(matches!(
            evaluate(&verifier(), "/api/protected/samples", None),
            GateDecision::Deny(DenyReason::MissingCredentials)
        ));
    }

    #[test]
    fn non_bearer_header_is_treated_as_missing() {
        assert!(matches!(
            evaluate(&verifier(), "/api/protected/samples", Some("Token abc")),
            GateDecision::Deny(DenyReason::MissingCredentials)
        ));
    }

    #[test]
    fn tampered_token_is_denied_as_invalid() {
        let token = signed_access_token(Uuid::new_v4());
        let tampered = format!("Bearer {}x", token);
        assert!(matches!(
            evaluate(&verifier(), "/api/protected/samples", Some(&tampered)),
            GateDecision::Deny(DenyReason::InvalidToken(_))
        ));
    }

    #[test]
    fn valid_token_is_allowed_with_identity() {
        let user_id = Uuid::new_v4();
        let header = format!("Bearer {}", signed_access_token(user_id));

        match evaluate(&verifier(), "/api/protected/samples", Some(&header)) {
            GateDecision::Allow(v) => assert_eq!(v.user_id, user_id),
            other => panic!("expected Allow, got {:?}", other),
        }
    }
}
