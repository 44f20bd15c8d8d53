/// JWT access token generation and validation (HS256)
///
/// The token's subject is the user's email address; every request resolves
/// the acting user from this claim fresh against the database, so tokens
/// carry identity only, never profile state.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's email address
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signing and verification keys, built once at startup from the
/// configured secret and passed explicitly wherever tokens are handled.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Generate an access token for the given email.
    pub fn generate_token(&self, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Validate a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
    }

    /// Access token lifetime in seconds, for login responses.
    pub fn expires_in_seconds(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let keys = JwtKeys::new("test-secret", 1);
        let token = keys.generate_token("alice@example.com").unwrap();
        let claims = keys.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let keys = JwtKeys::new("test-secret", 1);
        let other = JwtKeys::new("other-secret", 1);
        let token = keys.generate_token("alice@example.com").unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let keys = JwtKeys::new("test-secret", 1);
        assert!(matches!(
            keys.validate_token("not-a-token"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
