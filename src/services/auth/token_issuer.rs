//! Access / refresh トークンの発行と refresh フロー
//!
//! - JwtIssuer: 共有秘密鍵 (HS256) での署名のみを知る
//! - TokenService: pair 発行と refresh の手順を知る (handler を薄く保つ)

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::access_jwt::AccessTokenVerifier;

#[derive(Serialize)]
struct IssuedClaims<'a> {
    iss: &'a str,
    aud: &'a str,
    sub: String,
    iat: u64,
    exp: u64,
    jti: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    typ: Option<&'static str>,
}

/// Signs access/refresh tokens with the shared secret.
#[derive(Clone)]
pub struct JwtIssuer {
    issuer: String,
    audience: String,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl JwtIssuer {
    pub fn new(
        secret: &[u8],
        issuer: String,
        audience: String,
        access_ttl_seconds: u64,
        refresh_ttl_seconds: u64,
    ) -> Self {
        Self {
            issuer,
            audience,
            access_ttl_seconds,
            refresh_ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret),
        }
    }

    fn sign(&self, sub: Uuid, ttl_seconds: u64, typ: Option<&'static str>) -> Result<String, AppError> {
        let now = Utc::now().timestamp() as u64;
        let claims = IssuedClaims {
            iss: &self.issuer,
            aud: &self.audience,
            sub: sub.to_string(),
            iat: now,
            exp: now + ttl_seconds,
            jti: Uuid::new_v4().to_string(),
            typ,
        };

        let header = Header::new(Algorithm::HS256);
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }

    /// Issue a matching access + refresh token pair for a subject.
    pub fn issue_pair(&self, sub: Uuid) -> Result<IssuedTokenPair, AppError> {
        let access_token = self.sign(sub, self.access_ttl_seconds, None)?;
        let refresh_token = self.sign(sub, self.refresh_ttl_seconds, Some("refresh"))?;

        Ok(IssuedTokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer",
            expires_in: self.access_ttl_seconds,
        })
    }
}

/// Service that orchestrates token issuance and refresh.
///
/// - JwtIssuer is responsible for signing.
/// - AccessTokenVerifier is responsible for validating presented refresh tokens.
#[derive(Clone, Debug)]
pub struct TokenService {
    issuer: JwtIssuer,
    verifier: AccessTokenVerifier,
}

impl TokenService {
    pub fn new(issuer: JwtIssuer, verifier: AccessTokenVerifier) -> Self {
        Self { issuer, verifier }
    }

    /// Issue a new token pair for an authenticated subject (login).
    pub fn issue_token_pair(&self, sub: Uuid) -> Result<IssuedTokenPair, AppError> {
        self.issuer.issue_pair(sub)
    }

    /// Exchange a refresh token for a fresh pair.
    ///
    /// Stateless: the refresh token itself carries the subject; there is no
    /// server-side session to rotate. Validation failures collapse into one
    /// uniform 401.
    pub fn refresh(&self, refresh_token: &str) -> Result<IssuedTokenPair, AppError> {
        let v = self.verifier.verify_refresh(refresh_token).map_err(|err| {
            warn!(error = ?err, "refresh token verification failed");
            AppError::InvalidToken
        })?;

        self.issuer.issue_pair(v.user_id)
    }
}

/// Service-level return type to keep handlers thin.
///
/// Handlers map this into the HTTP DTO (TokenResponse) and into cookies.
#[derive(Clone, Debug)]
pub struct IssuedTokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"issuer-test-secret";

    fn service() -> TokenService {
        let issuer = JwtIssuer::new(SECRET, "kaku".into(), "kaku-web".into(), 900, 3600);
        let verifier = AccessTokenVerifier::new(SECRET, "kaku", "kaku-web", 0);
        TokenService::new(issuer, verifier)
    }

    #[test]
    fn issued_pair_round_trips_through_the_verifier() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let pair = svc.issue_token_pair(user_id).unwrap();

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 900);

        let verifier = AccessTokenVerifier::new(SECRET, "kaku", "kaku-web", 0);
        let access = verifier.verify_verified(&pair.access_token).unwrap();
        assert_eq!(access.user_id, user_id);

        let refresh = verifier.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.user_id, user_id);
    }

    #[test]
    fn refresh_issues_a_new_pair_for_the_same_subject() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let pair = svc.issue_token_pair(user_id).unwrap();

        let next = svc.refresh(&pair.refresh_token).unwrap();
        let verifier = AccessTokenVerifier::new(SECRET, "kaku", "kaku-web", 0);
        assert_eq!(
            verifier.verify_verified(&next.access_token).unwrap().user_id,
            user_id
        );
    }

    #[test]
    fn an_access_token_cannot_be_used_to_refresh() {
        let svc = service();
        let pair = svc.issue_token_pair(Uuid::new_v4()).unwrap();

        assert!(matches!(
            svc.refresh(&pair.access_token),
            Err(AppError::InvalidToken)
        ));
    }
}
