//! Page gate: decides what a protected page may render.
//!
//! Session resolution is asynchronous, so a page starts in `Resolving` and
//! moves to exactly one terminal state. Protected content is only ever
//! rendered from `Authenticated`, which rules out a flash of protected
//! content before a redirect.

use crate::session::Session;

/// Route unauthenticated visitors are sent to.
pub const SIGN_IN_ROUTE: &str = "/auth/signin";

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Resolving,
    Unauthenticated,
    Authenticated(Session),
    /// Resolution itself failed. Distinct from "not signed in".
    Failed(String),
}

/// What the page shell renders for a given [`GateState`].
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision<'a> {
    Skeleton,
    Redirect(&'static str),
    Render(&'a Session),
    AuthError(&'a str),
}

impl GateState {
    /// Fold a resolution result into a terminal state. A session without a
    /// user counts as unauthenticated.
    pub fn resolved<E: std::fmt::Display>(result: Result<Option<Session>, E>) -> Self {
        match result {
            Ok(Some(session)) if session.user.is_some() => GateState::Authenticated(session),
            Ok(_) => GateState::Unauthenticated,
            Err(err) => GateState::Failed(err.to_string()),
        }
    }

    pub fn decision(&self) -> GateDecision<'_> {
        match self {
            GateState::Resolving => GateDecision::Skeleton,
            GateState::Unauthenticated => GateDecision::Redirect(SIGN_IN_ROUTE),
            GateState::Authenticated(session) => GateDecision::Render(session),
            GateState::Failed(msg) => GateDecision::AuthError(msg),
        }
    }
}
