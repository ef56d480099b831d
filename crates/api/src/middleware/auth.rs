//! Session extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jafflix_core::error::CoreError;
use jafflix_core::gate::GateState;
use jafflix_core::session::Session;

use crate::error::AppError;
use crate::state::AppState;

/// The visitor's session, if any. Resolution failures reject with
/// `AUTH_ERROR`; a missing session does not.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.sessions.current_session(&parts.headers)?;
        Ok(CurrentSession(session))
    }
}

/// A signed-in visitor. Rejects with 401 when there is no session.
///
/// ```ignore
/// async fn my_handler(RequireSession(session): RequireSession) -> AppResult<Json<()>> {
///     tracing::info!(user_id = ?session.user_id(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireSession(pub Session);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.sessions.current_session(&parts.headers)? {
            Some(session) if session.user.is_some() => Ok(RequireSession(session)),
            _ => Err(AppError::Core(CoreError::Unauthorized(
                "Sign in required".into(),
            ))),
        }
    }
}

/// Resolved gate for a protected page. Never rejects: failures become
/// [`GateState::Failed`] so the page can render its own error state.
#[derive(Debug, Clone)]
pub struct PageGate(pub GateState);

impl FromRequestParts<AppState> for PageGate {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let gate = GateState::resolved(state.sessions.current_session(&parts.headers));
        if let GateState::Failed(msg) = &gate {
            tracing::warn!(error = %msg, path = %parts.uri.path(), "Page gate failed");
        }
        Ok(PageGate(gate))
    }
}
