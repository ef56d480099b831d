//! Session token generation and validation.
//!
//! A signed-in visitor carries one HS256-signed JWT in the session cookie.
//! The token holds the provider subject and the profile fields shown in the
//! page header, so resolving a session never calls back to the provider.

use chrono::{DateTime, TimeZone, Utc};
use jafflix_core::session::{Session, SessionUser};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the identity provider's user id.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

impl SessionClaims {
    /// The session a page sees. The user id is the token subject.
    pub fn into_session(self) -> Session {
        let expires = Utc
            .timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Session {
            user: Some(SessionUser {
                id: self.sub,
                email: self.email,
                name: self.name,
                image: self.picture,
            }),
            expires,
        }
    }
}

/// Configuration for session token signing.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in seconds (default: 30 days).
    pub max_age_secs: i64,
}

/// Default session lifetime: 30 days.
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                | Required | Default   |
    /// |------------------------|----------|-----------|
    /// | `AUTH_SECRET`          | **yes**  | --        |
    /// | `SESSION_MAX_AGE_SECS` | no       | `2592000` |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("AUTH_SECRET").expect("AUTH_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_SECRET must not be empty");

        let max_age_secs: i64 = std::env::var("SESSION_MAX_AGE_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_MAX_AGE_SECS.to_string())
            .parse()
            .expect("SESSION_MAX_AGE_SECS must be a valid i64");

        Self {
            secret,
            max_age_secs,
        }
    }
}

/// Generate a session token for `user`, valid for `config.max_age_secs`.
pub fn generate_session_token(
    user: &SessionUser,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();

    let claims = SessionClaims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        picture: user.image.clone(),
        exp: now + config.max_age_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token. Checks signature and expiry.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
