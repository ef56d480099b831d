use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a metadata API key is configured.
    pub catalog_configured: bool,
}

/// GET /health -- returns service health. A missing metadata key degrades
/// the service but does not take it down.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog_configured = !state.config.tmdb.api_key.is_empty();

    let status = if catalog_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        catalog_configured,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
