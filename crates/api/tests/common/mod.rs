#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::COOKIE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jafflix_core::catalog::{CatalogResult, MovieCatalog};
use jafflix_core::display::ImageUrls;
use jafflix_core::error::CatalogError;
use jafflix_core::movie::{CastMember, CrewMember, Genre, MovieDetail, MovieId, MovieSummary};
use jafflix_core::session::SessionUser;
use jafflix_core::suggestion::Suggestion;
use jafflix_tmdb::TmdbConfig;
use tower::ServiceExt;

use jafflix_api::auth::jwt::{SessionConfig, DEFAULT_SESSION_MAX_AGE_SECS};
use jafflix_api::auth::provider::{GoogleConfig, IdentityProvider, ProviderError};
use jafflix_api::auth::session::SessionGateway;
use jafflix_api::config::ServerConfig;
use jafflix_api::router::build_app_router;
use jafflix_api::state::AppState;
use jafflix_api::ws::WsManager;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const APP_URL: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![APP_URL.to_string()],
        request_timeout_secs: 30,
        render_wait_ms: 2_000,
        app_url: APP_URL.to_string(),
        tmdb: TmdbConfig {
            api_key: "test-key".into(),
            ..TmdbConfig::default()
        },
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
            max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
        },
        google: GoogleConfig {
            client_id: "test-client-id".into(),
            client_secret: "test-client-secret".into(),
        },
    }
}

// ---------------------------------------------------------------------------
// Fake catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Popular(i64),
    Search(String, i64),
    Details(String),
    Suggest(String),
}

/// In-memory catalog. Listings answer with one movie named after the
/// request; details come from `with_detail`, anything else is a 404.
#[derive(Default)]
pub struct FakeCatalog {
    calls: Mutex<Vec<Call>>,
    details: HashMap<String, MovieDetail>,
    failure: Option<CatalogError>,
    delay: Option<Duration>,
    suggestions: Vec<Suggestion>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detail(mut self, movie: MovieDetail) -> Self {
        self.details.insert(movie.id.to_string(), movie);
        self
    }

    pub fn failing(mut self, err: CatalogError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_suggestions(mut self, hits: Vec<Suggestion>) -> Self {
        self.suggestions = hits;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer<T>(&self, call: Call, ok: impl FnOnce() -> CatalogResult<T>) -> CatalogResult<T> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => ok(),
        }
    }
}

pub fn summary(id: i64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/poster{id}.jpg")),
        overview: format!("Overview of {title}"),
    }
}

/// A detail record with `cast` actors and `crew` crew members.
pub fn detail(id: i64, title: &str, cast: usize, crew: usize) -> MovieDetail {
    MovieDetail {
        id,
        title: title.to_string(),
        poster_path: Some("/poster.jpg".into()),
        overview: "A thief who steals corporate secrets through dream-sharing.".into(),
        genres: vec![
            Genre {
                id: 28,
                name: "Action".into(),
            },
            Genre {
                id: 878,
                name: "Science Fiction".into(),
            },
        ],
        rating: 8.369,
        release_date: "2010-07-15".into(),
        cast: (1..=cast)
            .map(|i| CastMember {
                id: i as i64,
                name: format!("Actor {i}"),
                character: format!("Role {i}"),
                profile_path: None,
            })
            .collect(),
        crew: (1..=crew)
            .map(|i| CrewMember {
                id: 100 + i as i64,
                name: format!("Crew {i}"),
                job: format!("Job {i}"),
            })
            .collect(),
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    async fn list_popular(&self, page: i64) -> CatalogResult<Vec<MovieSummary>> {
        self.answer(Call::Popular(page), || {
            Ok(vec![summary(page, &format!("Popular page {page}"))])
        })
        .await
    }

    async fn search(&self, query: &str, page: i64) -> CatalogResult<Vec<MovieSummary>> {
        let result = if query == "zzzz-no-results" {
            Vec::new()
        } else {
            vec![summary(100 + page, &format!("{query} result {page}"))]
        };
        self.answer(Call::Search(query.to_string(), page), || Ok(result))
            .await
    }

    async fn get_details(&self, id: &MovieId) -> CatalogResult<MovieDetail> {
        let found = self.details.get(id.as_str()).cloned();
        self.answer(Call::Details(id.to_string()), || {
            found.ok_or(CatalogError::Upstream {
                status: 404,
                message: "The resource you requested could not be found.".into(),
            })
        })
        .await
    }

    async fn suggest(&self, query: &str) -> CatalogResult<Vec<Suggestion>> {
        let hits = self.suggestions.clone();
        self.answer(Call::Suggest(query.to_string()), || Ok(hits))
            .await
    }
}

// ---------------------------------------------------------------------------
// Fake identity provider
// ---------------------------------------------------------------------------

pub const GOOD_CODE: &str = "good-code";

/// Accepts only [`GOOD_CODE`] and returns [`test_user`].
pub struct FakeIdentity;

pub fn test_user() -> SessionUser {
    SessionUser {
        id: "google-108".into(),
        email: Some("test@example.com".into()),
        name: Some("Test User".into()),
        image: None,
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn id(&self) -> &'static str {
        "google"
    }

    fn authorize_url(&self, state: &str, redirect_uri: &str) -> Result<String, ProviderError> {
        Ok(format!(
            "https://accounts.example.com/auth?state={state}&redirect_uri={redirect_uri}"
        ))
    }

    async fn exchange(
        &self,
        code: &str,
        _redirect_uri: &str,
    ) -> Result<SessionUser, ProviderError> {
        if code == GOOD_CODE {
            Ok(test_user())
        } else {
            Err(ProviderError::Rejected {
                status: 400,
                body: "invalid_grant".into(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router (same middleware stack as production)
/// around `catalog`.
pub fn build_test_app(catalog: Arc<FakeCatalog>) -> Router {
    build_test_app_with(test_config(), catalog)
}

pub fn build_test_app_with(config: ServerConfig, catalog: Arc<FakeCatalog>) -> Router {
    let state = AppState {
        images: ImageUrls::new(config.tmdb.image_base_url.clone()),
        sessions: Arc::new(SessionGateway::new(config.session.clone(), &config.app_url)),
        config: Arc::new(config.clone()),
        catalog,
        identity: Arc::new(FakeIdentity),
        ws_manager: Arc::new(WsManager::new()),
    };
    build_app_router(state, &config)
}

/// `Cookie` header value carrying a valid session for [`test_user`].
pub fn session_cookie() -> String {
    let gateway = SessionGateway::new(test_config().session, APP_URL);
    let set_cookie = gateway.issue_cookie(&test_user()).unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

/// Anonymous GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

/// GET as the signed-in [`test_user`].
pub async fn get_authed(app: Router, uri: &str) -> Response<Body> {
    let cookie = session_cookie();
    send(app, Method::GET, uri, Some(&cookie)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("response should redirect")
        .to_str()
        .unwrap()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}
