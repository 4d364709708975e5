//! Session token handling (HS256 JWT)

use account_shared::config::JwtSettings;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

/// Payload of an issued session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies session tokens with a symmetric secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiry_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_seconds,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(&settings.secret, settings.access_token_expiry)
    }

    pub fn expiry_seconds(&self) -> i64 {
        self.expiry_seconds
    }

    pub fn generate_session_token(
        &self,
        user_id: &Uuid,
        email: &str,
        role: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = SessionClaims {
            id: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expiry_seconds)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-unit-test-secret";

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::new(SECRET, 3600);
        let user_id = Uuid::new_v4();
        let token = service
            .generate_session_token(&user_id, "a@b.com", "member")
            .unwrap();
        assert!(!token.is_empty());

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.id, user_id.to_string());
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, "member");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new(SECRET, 3600);
        let other = JwtService::new("another-secret-another-secret-xx", 3600);
        let token = issuer
            .generate_session_token(&Uuid::new_v4(), "a@b.com", "admin")
            .unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::ValidationError(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        // Past the default 60s leeway.
        let service = JwtService::new(SECRET, -300);
        let token = service
            .generate_session_token(&Uuid::new_v4(), "a@b.com", "member")
            .unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_garbage_token() {
        let service = JwtService::new(SECRET, 3600);
        assert!(service.validate_token("not.a.token").is_err());
    }
}
