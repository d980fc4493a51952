//! Argon2id password hashing / verification.
//!
//! - Hashes are stored in PHC string format (parameters + salt included).
//! - Verification failures and malformed stored hashes both come back as
//!   "no match"; the caller only learns a boolean.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::error;

use crate::error::AppError;

pub fn hash(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            AppError::Internal
        })
}

pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hashed = hash("correct horse battery staple").unwrap();
        assert!(hashed.starts_with("$argon2id$"));
        assert!(verify("correct horse battery staple", &hashed));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hashed = hash("first").unwrap();
        assert!(!verify("second", &hashed));
    }

    #[test]
    fn malformed_stored_hash_is_no_match() {
        assert!(!verify("anything", "not-a-phc-string"));
    }
}
