use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// HTML pages, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/movie/{id}", get(pages::movie_detail))
        .route("/auth/signin", get(pages::sign_in))
}
