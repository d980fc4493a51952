//! Access token (HS256 JWT) 検証 → VerifiedAccessToken への変換
//!
//! - 署名・exp・iss/aud は jsonwebtoken の Validation に任せる
//! - それに加えて「空クレームでないこと」「sub が UUID であること」
//!   「refresh トークンを access として使っていないこと」を strict に見る

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    MissingOrInvalidAud,
    EmptyClaim(&'static str),
    InvalidSubUuid,
    /// `typ: "refresh"` のトークンが access として提示された
    RefreshTokenUsed,
    /// refresh 検証で `typ: "refresh"` が無かった
    NotARefreshToken,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingOrInvalidAud => write!(f, "missing or invalid 'aud' claim"),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidSubUuid => write!(f, "invalid 'sub' (expected UUID)"),
            Self::RefreshTokenUsed => write!(f, "refresh token presented as access token"),
            Self::NotARefreshToken => write!(f, "expected a refresh token"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

fn aud_is_present_and_valid(aud: &serde_json::Value) -> bool {
    match aud {
        // Typical: aud is a string
        serde_json::Value::String(s) => !s.trim().is_empty(),
        // Also valid: aud is an array of strings
        serde_json::Value::Array(arr) => arr.iter().any(|v| match v {
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }),
        // Missing claim ends up as Null due to #[serde(default)]
        _ => false,
    }
}

/// Token claims as issued by this service.
///
/// NOTE:
/// - `aud` in JWT can be either string or array; jsonwebtoken validates it via
///   `Validation::set_audience`, we only re-check non-emptiness here.
/// - `typ` distinguishes refresh tokens from access tokens (absent on access).
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,

    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub typ: Option<String>,
}

/// 検証済み・アプリ側で使う型
///
/// - `sub` はプロジェクト規約として UUID なので、ここで `Uuid` に昇格させる
/// - `jti` は監査/ログ相関用
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
    pub jti: Option<String>,
}

/// HS256 (shared secret) token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AccessTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessTokenVerifier {
    pub fn new(secret: &[u8], issuer: &str, audience: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    // Verify signature/exp/iss/aud and decode the claims.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks signature, `exp`, `iss`, `aud`.
    /// This method additionally checks that required claims are non-empty and
    /// that the token is not a refresh token.
    pub fn verify_strict(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.iss.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("iss"));
        }
        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(AccessJwtError::EmptyClaim("exp"));
        }
        if !aud_is_present_and_valid(&claims.aud) {
            return Err(AccessJwtError::MissingOrInvalidAud);
        }

        if claims.typ.as_deref() == Some("refresh") {
            return Err(AccessJwtError::RefreshTokenUsed);
        }

        // Project convention: subject is a UUID
        if Self::parse_sub_uuid(&claims.sub).is_err() {
            return Err(AccessJwtError::InvalidSubUuid);
        }

        Ok(claims)
    }

    /// Verify + strict claim validation, then convert the claims into the
    /// application-friendly type. Entry-point for the request gate.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify_strict(token)?;

        let user_id =
            Self::parse_sub_uuid(&claims.sub).map_err(|_| AccessJwtError::InvalidSubUuid)?;

        Ok(VerifiedAccessToken {
            user_id,
            jti: claims.jti,
        })
    }

    /// Verify a refresh token (`typ: "refresh"` required).
    ///
    /// Same key and validation rules as access tokens; only the `typ` gate
    /// differs.
    pub fn verify_refresh(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.typ.as_deref() != Some("refresh") {
            return Err(AccessJwtError::NotARefreshToken);
        }
        if !aud_is_present_and_valid(&claims.aud) {
            return Err(AccessJwtError::MissingOrInvalidAud);
        }

        let user_id =
            Self::parse_sub_uuid(&claims.sub).map_err(|_| AccessJwtError::InvalidSubUuid)?;

        Ok(VerifiedAccessToken {
            user_id,
            jti: claims.jti,
        })
    }

    // Helper: parse `sub` into UUID
    pub fn parse_sub_uuid(sub: &str) -> Result<Uuid, ()> {
        Uuid::parse_str(sub).map_err(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret";

    fn verifier() -> AccessTokenVerifier {
        AccessTokenVerifier::new(SECRET, "kaku", "kaku-web", 0)
    }

    fn sign(secret: &[u8], claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn base_claims() -> serde_json::Value {
        let now = chrono::Utc::now().timestamp() as u64;
        json!({
            "iss": "kaku",
            "aud": "kaku-web",
            "sub": Uuid::new_v4().to_string(),
            "iat": now,
            "exp": now + 600,
            "jti": Uuid::new_v4().to_string(),
        })
    }

    #[test]
    fn accepts_a_validly_signed_token() {
        let claims = base_claims();
        let sub = claims["sub"].as_str().unwrap().to_string();
        let token = sign(SECRET, claims);

        let v = verifier().verify_verified(&token).unwrap();
        assert_eq!(v.user_id.to_string(), sub);
        assert!(v.jti.is_some());
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let token = sign(b"someone-elses-secret", base_claims());
        assert!(matches!(
            verifier().verify_verified(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn rejects_an_expired_token() {
        let mut claims = base_claims();
        let now = chrono::Utc::now().timestamp() as u64;
        claims["exp"] = json!(now - 120);
        let token = sign(SECRET, claims);

        assert!(matches!(
            verifier().verify_verified(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn rejects_a_wrong_audience() {
        let mut claims = base_claims();
        claims["aud"] = json!("other-app");
        let token = sign(SECRET, claims);

        assert!(verifier().verify_verified(&token).is_err());
    }

    #[test]
    fn rejects_a_non_uuid_subject() {
        let mut claims = base_claims();
        claims["sub"] = json!("user-42");
        let token = sign(SECRET, claims);

        assert!(matches!(
            verifier().verify_verified(&token),
            Err(AccessJwtError::InvalidSubUuid)
        ));
    }

    #[test]
    fn rejects_a_refresh_token_used_as_access_token() {
        let mut claims = base_claims();
        claims["typ"] = json!("refresh");
        let token = sign(SECRET, claims);

        assert!(matches!(
            verifier().verify_verified(&token),
            Err(AccessJwtError::RefreshTokenUsed)
        ));
    }

    #[test]
    fn verify_refresh_requires_the_typ_claim() {
        let access = sign(SECRET, base_claims());
        assert!(matches!(
            verifier().verify_refresh(&access),
            Err(AccessJwtError::NotARefreshToken)
        ));

        let mut claims = base_claims();
        claims["typ"] = json!("refresh");
        let refresh = sign(SECRET, claims);
        assert!(verifier().verify_refresh(&refresh).is_ok());
    }
}
