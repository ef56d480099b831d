//! REST client for the TMDB v3 HTTP endpoints.
//!
//! Wraps popular listing, title search, detail-with-credits and multi search
//! using [`reqwest`]. Every request carries the API key as the `api_key`
//! query parameter. Failures are returned unchanged: no retries, no
//! rewriting of the upstream message.

use async_trait::async_trait;
use jafflix_core::catalog::{CatalogResult, MovieCatalog};
use jafflix_core::error::CatalogError;
use jafflix_core::movie::{MovieDetail, MovieId, MovieSummary};
use jafflix_core::suggestion::Suggestion;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::models::{MovieDetailResult, MovieResult, MultiResult, Paged, StatusBody};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
/// Default image host prefix (size segment is appended per image).
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Connection settings, read once at startup and injected here.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub base_url: String,
    pub image_base_url: String,
    /// May be empty: the client still constructs and calls fail upstream with 401.
    pub api_key: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

/// Errors from the TMDB REST layer.
#[derive(Debug, thiserror::Error)]
pub enum TmdbApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    ///
    /// Always stored without its URL, which carries the `api_key`.
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// TMDB returned a non-2xx status code.
    #[error("TMDB API error ({status}): {message}")]
    ApiError {
        status: u16,
        /// `status_message` from the error body, or the raw body.
        message: String,
    },

    /// The configured base URL cannot be parsed.
    #[error("Invalid TMDB base URL: {0}")]
    BaseUrl(String),
}

impl From<reqwest::Error> for TmdbApiError {
    fn from(err: reqwest::Error) -> Self {
        TmdbApiError::Request(err.without_url())
    }
}

impl From<TmdbApiError> for CatalogError {
    fn from(err: TmdbApiError) -> Self {
        match err {
            TmdbApiError::ApiError { status, message } => {
                CatalogError::Upstream { status, message }
            }
            TmdbApiError::Request(e) if e.is_decode() => {
                CatalogError::Decode(e.without_url().to_string())
            }
            TmdbApiError::Request(e) => CatalogError::Transport(e.without_url().to_string()),
            TmdbApiError::BaseUrl(msg) => CatalogError::Transport(msg),
        }
    }
}

/// HTTP client for TMDB.
pub struct TmdbApi {
    client: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbApi {
    pub fn new(config: TmdbConfig) -> Self {
        if config.api_key.is_empty() {
            tracing::warn!("TMDB API key is empty; catalog requests will be rejected upstream");
        }
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// `GET /movie/popular?page=`.
    pub async fn popular(&self, page: i64) -> Result<Paged<MovieResult>, TmdbApiError> {
        let page = page.to_string();
        self.get(&["movie", "popular"], &[("page", page.as_str())])
            .await
    }

    /// `GET /search/movie?query=&page=`. The query is sent even when empty.
    pub async fn search_movies(
        &self,
        query: &str,
        page: i64,
    ) -> Result<Paged<MovieResult>, TmdbApiError> {
        let page = page.to_string();
        self.get(
            &["search", "movie"],
            &[("query", query), ("page", page.as_str())],
        )
        .await
    }

    /// `GET /movie/{id}?append_to_response=credits`.
    ///
    /// The id is sent as a single path segment, so it is percent-encoded
    /// rather than interpreted.
    pub async fn movie_details(&self, id: &str) -> Result<MovieDetailResult, TmdbApiError> {
        self.get(&["movie", id], &[("append_to_response", "credits")])
            .await
    }

    /// `GET /search/multi?query=`.
    pub async fn search_multi(&self, query: &str) -> Result<Paged<MultiResult>, TmdbApiError> {
        self.get(&["search", "multi"], &[("query", query)]).await
    }

    // ---- private helpers ----

    fn url(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url, TmdbApiError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| TmdbApiError::BaseUrl(format!("{}: {e}", self.config.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| TmdbApiError::BaseUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key)
            .extend_pairs(params);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<T, TmdbApiError> {
        let url = self.url(segments, params)?;
        tracing::debug!(path = %url.path(), "TMDB request");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code. On failure the TMDB
    /// `status_message` is preferred over the raw body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TmdbApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<StatusBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .filter(|m| !m.is_empty())
                .unwrap_or(body);
            tracing::debug!(status = status.as_u16(), %message, "TMDB returned an error");
            return Err(TmdbApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TmdbApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MovieCatalog for TmdbApi {
    async fn list_popular(&self, page: i64) -> CatalogResult<Vec<MovieSummary>> {
        let paged = self.popular(page).await?;
        Ok(paged.results.into_iter().map(MovieSummary::from).collect())
    }

    async fn search(&self, query: &str, page: i64) -> CatalogResult<Vec<MovieSummary>> {
        let paged = self.search_movies(query, page).await?;
        Ok(paged.results.into_iter().map(MovieSummary::from).collect())
    }

    async fn get_details(&self, id: &MovieId) -> CatalogResult<MovieDetail> {
        let detail = self.movie_details(id.as_str()).await?;
        Ok(detail.into())
    }

    async fn suggest(&self, query: &str) -> CatalogResult<Vec<Suggestion>> {
        let paged = self.search_multi(query).await?;
        Ok(paged
            .results
            .into_iter()
            .filter_map(MultiResult::into_suggestion)
            .collect())
    }
}
