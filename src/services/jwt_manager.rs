//! Signed, time-bound access tokens.
//!
//! Tokens are HS256 JWTs carrying the username and role. Nothing is kept
//! server side: a token is valid as long as its signature checks out and
//! its expiry has not passed.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("secret key must not be empty")]
    EmptySecret,
    #[error("cannot sign token: {0}")]
    Sign(jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// username
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl UserClaims {
    pub fn username(&self) -> &str {
        &self.sub
    }
}

pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_duration: Duration,
}

impl JwtManager {
    pub fn new(secret_key: &str, token_duration: Duration) -> Result<Self, TokenError> {
        if secret_key.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation,
            token_duration,
        })
    }

    pub fn token_duration(&self) -> Duration {
        self.token_duration
    }

    pub fn issue(&self, username: &str, role: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let lifetime = i64::try_from(self.token_duration.as_secs()).unwrap_or(i64::MAX);
        self.sign(UserClaims {
            sub: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now.saturating_add(lifetime),
        })
    }

    pub fn verify(&self, token: &str) -> Result<UserClaims, TokenError> {
        decode::<UserClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }

    fn sign(&self, claims: UserClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(TokenError::Sign)
    }
}
