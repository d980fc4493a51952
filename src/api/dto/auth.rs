/*
 * Responsibility
 * - auth 系 (register/login/refresh/logout) の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub user_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') || email.len() > 254 {
            return Err("a valid email is required");
        }
        if self.user_name.trim().is_empty() {
            return Err("userName is required");
        }
        if self.user_name.len() > 64 {
            return Err("userName must be <= 64 chars");
        }
        if self.password.len() < 8 {
            return Err("password must be at least 8 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

/// Refresh は cookie から取るのが基本。body はフォールバック
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// OAuth 風の wire format (snake_case) に合わせる
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Usually "Bearer"
    pub token_type: String,
    /// Seconds until the access token expires.
    pub expires_in: u64,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_an_email_shape() {
        let req = RegisterRequest {
            email: "not-an-email".into(),
            user_name: "kaku".into(),
            password: "long enough".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_rejects_short_passwords() {
        let req = RegisterRequest {
            email: "a@example.com".into(),
            user_name: "kaku".into(),
            password: "short".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_accepts_a_well_formed_request() {
        let req = RegisterRequest {
            email: "a@example.com".into(),
            user_name: "kaku".into(),
            password: "long enough".into(),
        };
        assert!(req.validate().is_ok());
    }
}
