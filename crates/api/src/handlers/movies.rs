//! JSON movie API: listing, detail and typeahead suggestions.

use axum::extract::{Path, Query, State};
use axum::Json;
use jafflix_core::error::CoreError;
use jafflix_core::list::ListQuery;
use jafflix_core::movie::{MovieDetail, MovieId, MovieSummary};
use jafflix_core::suggestion::Suggestion;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::RequireSession;
use crate::query::{MovieListParams, SuggestParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// One page of a listing, echoing what was asked for.
#[derive(Debug, Serialize)]
pub struct MoviePage {
    pub page: i64,
    pub query: String,
    pub results: Vec<MovieSummary>,
}

/// A typeahead hit with its display text and link resolved.
#[derive(Debug, Serialize)]
pub struct SuggestionItem {
    #[serde(flatten)]
    pub hit: Suggestion,
    pub label: String,
    pub href: String,
}

impl From<Suggestion> for SuggestionItem {
    fn from(hit: Suggestion) -> Self {
        Self {
            label: hit.label(),
            href: hit.href(),
            hit,
        }
    }
}

/// GET /api/v1/movies?query=&page=
///
/// An empty `query` lists popular movies.
pub async fn list_movies(
    RequireSession(_session): RequireSession,
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<Json<DataResponse<MoviePage>>> {
    let ListQuery { page, query } = params.into_list_query();

    let results = if query.is_empty() {
        state.catalog.list_popular(page).await?
    } else {
        state.catalog.search(&query, page).await?
    };

    Ok(Json(DataResponse {
        data: MoviePage {
            page,
            query,
            results,
        },
    }))
}

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    RequireSession(_session): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<MovieDetail>>> {
    let id = MovieId::new(id);
    if id.is_empty() {
        return Err(CoreError::Validation("Movie id must not be empty".into()).into());
    }

    let movie = state.catalog.get_details(&id).await?;
    Ok(Json(DataResponse { data: movie }))
}

/// GET /api/v1/suggestions?query=
///
/// Each hit carries its `kind` fields plus `label` and `href`. A blank
/// query answers with no suggestions and makes no upstream call.
pub async fn suggestions(
    RequireSession(_session): RequireSession,
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> AppResult<Json<DataResponse<Vec<SuggestionItem>>>> {
    let query = params.query.trim();
    if query.is_empty() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }

    let hits = state.catalog.suggest(query).await?;
    Ok(Json(DataResponse {
        data: hits.into_iter().map(SuggestionItem::from).collect(),
    }))
}
