pub mod auth;
pub mod health;
pub mod movies;
pub mod pages;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree. Every route requires a signed-in visitor.
///
/// ```text
/// /movies                      popular listing or search (?query=&page=)
/// /movies/{id}                 detail with cast and crew
/// /suggestions                 typeahead hits (?query=)
/// /ws/search                   live search WebSocket
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/movies", movies::router())
        .route("/suggestions", get(handlers::movies::suggestions))
        .route("/ws/search", get(ws::search_ws_handler))
}
