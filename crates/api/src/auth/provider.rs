//! Identity provider integration (OAuth 2.0 authorization code flow).
//!
//! The provider only has to do two things for the app: build the URL the
//! browser is sent to, and turn the returned `code` into a profile.

use async_trait::async_trait;
use jafflix_core::session::SessionUser;
use reqwest::Url;
use serde::Deserialize;

const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Errors from talking to the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Identity provider rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid identity provider URL: {0}")]
    Url(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short id used in route paths (`/api/auth/signin/{id}`).
    fn id(&self) -> &'static str;

    /// URL to send the browser to. `state` is echoed back on the callback.
    fn authorize_url(&self, state: &str, redirect_uri: &str) -> Result<String, ProviderError>;

    /// Exchange an authorization code for the signed-in user's profile.
    async fn exchange(&self, code: &str, redirect_uri: &str)
        -> Result<SessionUser, ProviderError>;
}

/// Google OAuth client credentials.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl GoogleConfig {
    /// Load Google credentials from environment variables.
    ///
    /// | Env Var                | Required |
    /// |------------------------|----------|
    /// | `GOOGLE_CLIENT_ID`     | **yes**  |
    /// | `GOOGLE_CLIENT_SECRET` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or empty.
    pub fn from_env() -> Self {
        let client_id = std::env::var("GOOGLE_CLIENT_ID")
            .expect("GOOGLE_CLIENT_ID must be set in the environment");
        assert!(!client_id.is_empty(), "GOOGLE_CLIENT_ID must not be empty");

        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET")
            .expect("GOOGLE_CLIENT_SECRET must be set in the environment");
        assert!(
            !client_secret.is_empty(),
            "GOOGLE_CLIENT_SECRET must not be empty"
        );

        Self {
            client_id,
            client_secret,
        }
    }
}

/// Provider endpoints. Overridable so tests can point at a local server.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub authorize: String,
    pub token: String,
    pub userinfo: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            authorize: GOOGLE_AUTHORIZE_URL.to_string(),
            token: GOOGLE_TOKEN_URL.to_string(),
            userinfo: GOOGLE_USERINFO_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OpenID Connect userinfo payload.
#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

pub struct GoogleProvider {
    client: reqwest::Client,
    config: GoogleConfig,
    endpoints: GoogleEndpoints,
}

impl GoogleProvider {
    pub fn new(config: GoogleConfig) -> Self {
        Self::with_endpoints(config, GoogleEndpoints::default())
    }

    pub fn with_endpoints(config: GoogleConfig, endpoints: GoogleEndpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            endpoints,
        }
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn id(&self) -> &'static str {
        "google"
    }

    fn authorize_url(&self, state: &str, redirect_uri: &str) -> Result<String, ProviderError> {
        let url = Url::parse_with_params(
            &self.endpoints.authorize,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .map_err(|e| ProviderError::Url(format!("{}: {e}", self.endpoints.authorize)))?;
        Ok(url.to_string())
    }

    async fn exchange(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<SessionUser, ProviderError> {
        let response = self
            .client
            .post(&self.endpoints.token)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;
        let token: TokenResponse = Self::ensure_success(response).await?.json().await?;

        let response = self
            .client
            .get(&self.endpoints.userinfo)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        let info: UserInfo = Self::ensure_success(response).await?.json().await?;

        tracing::debug!(sub = %info.sub, "Fetched identity provider profile");

        Ok(SessionUser {
            id: info.sub,
            email: info.email,
            name: info.name,
            image: info.picture,
        })
    }
}
