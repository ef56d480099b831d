use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/api/auth`.
///
/// ```text
/// GET      /signin/google       start the OAuth flow
/// GET      /callback/google     OAuth redirect target
/// GET|POST /signout             clear the session
/// GET      /session             current session as JSON
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin/google", get(auth::sign_in))
        .route("/callback/google", get(auth::callback))
        .route("/signout", get(auth::sign_out).post(auth::sign_out))
        .route("/session", get(auth::session))
}
