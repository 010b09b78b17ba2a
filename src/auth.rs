use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error_handler::ServiceError;

/// Token lifetime in seconds (24 hours).
pub const TOKEN_TTL_SECS: i64 = 86_400;

/// Claims carried by the session token handed out at register/login.
///
/// The token is a plain base64 encoding of these claims with no signature:
/// it is reversible, carries no integrity protection, and no endpoint
/// verifies it. Treat it as a display artifact, not a credential.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub user_id: String,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Password hashing failed: {}", e);
            ServiceError::Internal("Failed to hash password".to_string())
        })
}

/// Constant-time verification against a stored PHC-format hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| {
        log::error!("Stored password hash is malformed: {}", e);
        ServiceError::Internal("Stored password hash is invalid".to_string())
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => {
            log::error!("Password verification failed: {}", e);
            Err(ServiceError::Internal(
                "Failed to verify password".to_string(),
            ))
        }
    }
}

pub fn issue_token(user_id: &str) -> String {
    let claims = TokenClaims {
        user_id: user_id.to_string(),
        exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
    };
    // Serializing a two-field struct of String/i64 cannot fail.
    STANDARD.encode(serde_json::to_vec(&claims).unwrap_or_default())
}

pub fn decode_token(token: &str) -> Option<TokenClaims> {
    let bytes = STANDARD.decode(token).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("secret").expect("hash should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret", &hash).expect("verify should succeed"));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("secret").expect("hash should succeed");
        assert!(!verify_password("not-the-secret", &hash).expect("verify should succeed"));
    }

    #[test]
    fn same_password_hashes_to_different_salts() {
        let h1 = hash_password("secret").expect("hash should succeed");
        let h2 = hash_password("secret").expect("hash should succeed");
        assert_ne!(h1, h2);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("secret", "not-a-phc-hash").is_err());
    }

    #[test]
    fn token_roundtrips_through_base64_json() {
        let token = issue_token("user_42");
        let claims = decode_token(&token).expect("token should decode");
        assert_eq!(claims.user_id, "user_42");

        let now = Utc::now().timestamp();
        assert!(claims.exp >= now + TOKEN_TTL_SECS - 5);
        assert!(claims.exp <= now + TOKEN_TTL_SECS + 5);
    }

    #[test]
    fn garbage_token_decodes_to_none() {
        assert!(decode_token("@@not-base64@@").is_none());
        assert!(decode_token(&STANDARD.encode(b"not json")).is_none());
    }
}
