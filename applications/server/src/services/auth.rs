/// Authentication service - JWT and password handling
use crate::error::Result;
use calorie_core::UserId;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Stand-in credential for a malformed `Authorization` header. It fails
/// signature verification like any other bad token; the request is
/// rejected rather than crashing on the missing part.
const PLACEHOLDER_TOKEN: &str = "not-a-token";

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    token_lifetime: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub username: String,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration time
}

impl AuthService {
    pub fn new(secret: String, token_lifetime_hours: u64) -> Self {
        Self {
            secret,
            token_lifetime: Duration::hours(token_lifetime_hours as i64),
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, hash)?)
    }

    /// Issue a signed bearer token for a user
    pub fn issue_token(&self, user_id: &UserId, username: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.token_lifetime;

        let claims = Claims {
            sub: user_id.as_str().to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        Ok(encode(&Header::default(), &claims, &encoding_key)?)
    }

    /// Verify and decode a token, validating signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

/// Extract the credential from a full `Authorization` header value
///
/// The header splits on whitespace and the second token is the
/// credential ("Bearer <token>"). A malformed header yields a fixed
/// placeholder that fails verification downstream.
pub fn token_from_header(header: &str) -> &str {
    header.split_whitespace().nth(1).unwrap_or(PLACEHOLDER_TOKEN)
}
