//! Sign-in, OAuth callback, sign-out and session endpoints.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::Json;
use jafflix_core::gate::SIGN_IN_ROUTE;
use jafflix_core::session::Session;
use percent_encoding::utf8_percent_encode;

use crate::auth::cookies::{
    clear_cookie, read_cookie, set_cookie, CALLBACK_COOKIE, COOKIE_VALUE, FLOW_COOKIE_MAX_AGE_SECS,
    STATE_COOKIE,
};
use crate::auth::redirect::resolve_redirect;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentSession;
use crate::query::{CallbackParams, OAuthCallbackParams};
use crate::state::AppState;

fn sign_in_error(code: &str) -> Redirect {
    Redirect::to(&format!("{SIGN_IN_ROUTE}?error={code}"))
}

/// GET /api/auth/signin/google
///
/// Stores a CSRF `state` and the post-sign-in destination in short-lived
/// cookies, then sends the browser to the provider.
pub async fn sign_in(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<Response> {
    let app_url = &state.config.app_url;
    let csrf = uuid::Uuid::new_v4().to_string();
    let callback = resolve_redirect(params.callback_url.as_deref().unwrap_or("/"), app_url);
    let redirect_uri = state.config.oauth_callback_url(state.identity.id());

    let authorize = state
        .identity
        .authorize_url(&csrf, &redirect_uri)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let secure = state.sessions.secure_cookies();
    tracing::info!(provider = state.identity.id(), "Starting sign-in");

    Ok((
        AppendHeaders([
            (
                SET_COOKIE,
                set_cookie(STATE_COOKIE, &csrf, FLOW_COOKIE_MAX_AGE_SECS, secure),
            ),
            (
                SET_COOKIE,
                set_cookie(
                    CALLBACK_COOKIE,
                    &utf8_percent_encode(&callback, COOKIE_VALUE).to_string(),
                    FLOW_COOKIE_MAX_AGE_SECS,
                    secure,
                ),
            ),
        ]),
        Redirect::to(&authorize),
    )
        .into_response())
}

/// GET /api/auth/callback/google
///
/// Checks `state`, exchanges the code, issues the session cookie and lands
/// on the stored destination. Any failure goes back to the sign-in page with
/// an error code.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<OAuthCallbackParams>,
) -> Response {
    let secure = state.sessions.secure_cookies();
    let clear_flow = AppendHeaders([
        (SET_COOKIE, clear_cookie(STATE_COOKIE, secure)),
        (SET_COOKIE, clear_cookie(CALLBACK_COOKIE, secure)),
    ]);

    if let Some(error) = params.error.as_deref() {
        tracing::info!(error, "Identity provider returned an error");
        let code = if error == "access_denied" {
            "AccessDenied"
        } else {
            "OAuthCallback"
        };
        return (clear_flow, sign_in_error(code)).into_response();
    }

    let expected = read_cookie(&headers, STATE_COOKIE);
    let (Some(code), Some(returned)) = (params.code.as_deref(), params.state.as_deref()) else {
        return (clear_flow, sign_in_error("OAuthCallback")).into_response();
    };
    if expected != Some(returned) {
        tracing::warn!("OAuth state mismatch");
        return (clear_flow, sign_in_error("OAuthCallback")).into_response();
    }

    let redirect_uri = state.config.oauth_callback_url(state.identity.id());
    let user = match state.identity.exchange(code, &redirect_uri).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "OAuth code exchange failed");
            return (clear_flow, sign_in_error("OAuthCallback")).into_response();
        }
    };

    let session_cookie = match state.sessions.issue_cookie(&user) {
        Ok(cookie) => cookie,
        Err(e) => return AppError::Session(e).into_response(),
    };

    let destination = resolve_redirect(
        read_cookie(&headers, CALLBACK_COOKIE).unwrap_or("/"),
        &state.config.app_url,
    );
    tracing::info!(user_id = %user.id, "User signed in");

    (
        clear_flow,
        AppendHeaders([(SET_COOKIE, session_cookie)]),
        Redirect::to(&destination),
    )
        .into_response()
}

/// GET|POST /api/auth/signout
///
/// Always clears the cookie, even when the current session cannot be resolved.
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Ok(Some(session)) = state.sessions.current_session(&headers) {
        tracing::info!(user_id = ?session.user_id(), "User signed out");
    }
    (
        AppendHeaders([(SET_COOKIE, state.sessions.clear_cookie())]),
        Redirect::to(SIGN_IN_ROUTE),
    )
        .into_response()
}

/// GET /api/auth/session
///
/// The current session, or `null` when signed out.
pub async fn session(CurrentSession(session): CurrentSession) -> Json<Option<Session>> {
    Json(session)
}
