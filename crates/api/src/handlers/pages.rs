//! HTML page handlers.
//!
//! Protected pages consult the page gate before producing any markup: an
//! unauthenticated visitor is redirected, a failed resolution renders the
//! authentication error page, and only an authenticated visitor gets to
//! mount a controller.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use jafflix_core::detail::DetailController;
use jafflix_core::display::{MovieDetailView, ShareLinks};
use jafflix_core::gate::{GateDecision, GateState};
use jafflix_core::list::ListController;
use jafflix_core::movie::MovieId;
use jafflix_core::session::Session;
use jafflix_core::suggestion::QUERY_VALUE;
use percent_encoding::utf8_percent_encode;

use crate::error::PageError;
use crate::middleware::auth::PageGate;
use crate::query::{CallbackParams, DetailParams, MovieListParams, SignInPageParams};
use crate::state::AppState;
use crate::views;

/// Outcome of the gate for a protected page: either the session to render
/// for, or the response to send instead. Redirects to sign-in carry the
/// requested page as `callbackUrl`.
fn admit<'a>(gate: &'a GateState, requested: &Uri) -> Result<&'a Session, Response> {
    match gate.decision() {
        GateDecision::Render(session) => Ok(session),
        GateDecision::Skeleton => Err(views::home::gate_skeleton().into_response()),
        GateDecision::Redirect(to) => Err(sign_in_redirect(to, requested).into_response()),
        GateDecision::AuthError(msg) => Err(PageError::Auth(msg.to_string()).into_response()),
    }
}

fn sign_in_redirect(to: &str, requested: &Uri) -> Redirect {
    match requested.path_and_query().map(|pq| pq.as_str()) {
        None | Some("/") => Redirect::to(to),
        Some(target) => Redirect::to(&format!(
            "{to}?callbackUrl={}",
            utf8_percent_encode(target, QUERY_VALUE)
        )),
    }
}

/// GET /
pub async fn home(
    PageGate(gate): PageGate,
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let session = match admit(&gate, &uri) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let controller = ListController::new(state.catalog.clone(), params.into_list_query());
    let list = controller.settled_within(state.render_wait()).await;
    if list.loading {
        tracing::debug!(page = list.page, query = %list.query, "Listing not settled, rendering skeleton");
    }

    views::home::home_page(session, &list, &state.images).into_response()
}

/// GET /movie/{id}
pub async fn movie_detail(
    PageGate(gate): PageGate,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DetailParams>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let session = match admit(&gate, &uri) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let controller = DetailController::new(state.catalog.clone(), MovieId::new(id));
    let detail = controller.settled_within(state.render_wait()).await;

    if detail.loading {
        return views::detail::detail_skeleton(session).into_response();
    }

    let retry = uri.to_string();
    match (&detail.movie, &detail.error) {
        (Some(movie), None) => {
            let toggle = params.toggle();
            let view = MovieDetailView::new(movie, &state.images, toggle);
            let share = ShareLinks::new(&state.config.app_url, movie.id, &movie.title);
            views::detail::detail_page(session, &view, toggle, &share).into_response()
        }
        (_, error) => (
            StatusCode::NOT_FOUND,
            views::detail::detail_not_found(session, &retry, error.as_deref()),
        )
            .into_response(),
    }
}

/// GET /auth/signin
///
/// Already signed-in visitors go straight home.
pub async fn sign_in(
    PageGate(gate): PageGate,
    Query(params): Query<SignInPageParams>,
    Query(callback): Query<CallbackParams>,
) -> Response {
    match gate {
        GateState::Authenticated(_) => Redirect::to("/").into_response(),
        GateState::Failed(msg) => PageError::Auth(msg).into_response(),
        GateState::Resolving | GateState::Unauthenticated => views::auth::sign_in_page(
            params.error.as_deref(),
            callback.callback_url.as_deref(),
        )
        .into_response(),
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> PageError {
    PageError::NotFound
}
