use jafflix_tmdb::api::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
use jafflix_tmdb::TmdbConfig;

use crate::auth::jwt::SessionConfig;
use crate::auth::provider::GoogleConfig;

/// Server configuration loaded from environment variables.
///
/// Server settings have defaults suitable for local development; the auth
/// secrets have none and must be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long a page waits for its first fetch before rendering the
    /// loading skeleton instead (default: `8000`).
    pub render_wait_ms: u64,
    /// Canonical public URL, used for share links and OAuth redirects.
    pub app_url: String,
    /// Movie metadata API connection.
    pub tmdb: TmdbConfig,
    /// Session token signing.
    pub session: SessionConfig,
    /// Google OAuth client credentials.
    pub google: GoogleConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `RENDER_WAIT_MS`       | `8000`                           |
    /// | `APP_URL`              | `http://localhost:3000`          |
    /// | `TMDB_BASE_URL`        | `https://api.themoviedb.org/3`   |
    /// | `TMDB_IMAGE_BASE_URL`  | `https://image.tmdb.org/t/p`     |
    /// | `TMDB_API_KEY`         | empty (calls fail upstream)      |
    ///
    /// See [`SessionConfig::from_env`] and [`GoogleConfig::from_env`] for
    /// the required auth variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let render_wait_ms: u64 = std::env::var("RENDER_WAIT_MS")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("RENDER_WAIT_MS must be a valid u64");

        let app_url = std::env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let tmdb = TmdbConfig {
            base_url: std::env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            image_base_url: std::env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.into()),
            api_key: std::env::var("TMDB_API_KEY").unwrap_or_default(),
        };

        let session = SessionConfig::from_env();
        let google = GoogleConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            render_wait_ms,
            app_url,
            tmdb,
            session,
            google,
        }
    }

    /// OAuth redirect URI registered with the provider.
    pub fn oauth_callback_url(&self, provider_id: &str) -> String {
        format!("{}/api/auth/callback/{provider_id}", self.app_url)
    }
}
