//! Landing page: search plus the popular listing or search results.

use axum::response::Html;
use jafflix_core::display::ImageUrls;
use jafflix_core::fetch::FetchOutcome;
use jafflix_core::list::ListState;
use jafflix_core::session::Session;

use super::layout::document;
use super::movies::{
    empty_state, inline_error, movie_grid, pagination, search_bar, skeleton_grid,
};
use super::escape;

/// Page rendered while the visitor's session is still being resolved.
pub fn gate_skeleton() -> Html<String> {
    document("Loading", None, &skeleton_grid())
}

pub fn home_page(session: &Session, state: &ListState, images: &ImageUrls) -> Html<String> {
    let heading = if state.is_search() {
        format!("<h1>Results for &quot;{}&quot;</h1>", escape(&state.query))
    } else {
        "<h1>Popular Movies</h1>".to_string()
    };

    let listing = match state.outcome() {
        FetchOutcome::Idle | FetchOutcome::Loading => skeleton_grid(),
        FetchOutcome::Error(message) => inline_error(&message),
        FetchOutcome::Success([]) => empty_state(),
        FetchOutcome::Success(movies) => format!(
            "{}{}",
            movie_grid(movies, images),
            pagination(&state.query, state.page)
        ),
    };

    let body = format!("{}\n{heading}\n{listing}", search_bar(&state.query));
    let title = if state.is_search() {
        state.query.as_str()
    } else {
        "Popular Movies"
    };
    document(title, Some(session), &body)
}
