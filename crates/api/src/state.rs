use std::sync::Arc;
use std::time::Duration;

use jafflix_core::catalog::MovieCatalog;
use jafflix_core::display::ImageUrls;

use crate::auth::provider::IdentityProvider;
use crate::auth::session::SessionGateway;
use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Movie metadata source (TMDB in production).
    pub catalog: Arc<dyn MovieCatalog>,
    /// Poster and profile URL builder.
    pub images: ImageUrls,
    /// Resolves the visitor's session from request cookies.
    pub sessions: Arc<SessionGateway>,
    /// OAuth identity provider used by the sign-in flow.
    pub identity: Arc<dyn IdentityProvider>,
    /// WebSocket connection manager (live-search clients).
    pub ws_manager: Arc<WsManager>,
}

impl AppState {
    /// Time a page waits on its first fetch before falling back to the skeleton.
    pub fn render_wait(&self) -> Duration {
        Duration::from_millis(self.config.render_wait_ms)
    }
}
