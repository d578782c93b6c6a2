pub mod password;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every session token lives exactly this long.
pub const TOKEN_TTL_DAYS: i64 = 30;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Payload signed into a session token. Only the email identifies the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(email: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Malformed, badly signed or expired. Callers never learn which.
    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("JWT generation error: {0}")]
    Signing(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Issues and verifies HS256 session tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    keys: Arc<Keys>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                validation,
            }),
        })
    }

    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_at(email, Utc::now())
    }

    pub fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(email, issued_at);
        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}
