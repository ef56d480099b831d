//! The movie catalog contract used by the view-state controllers.
//!
//! Implemented by the TMDB client in production and by in-memory fakes in
//! tests. Implementations must not retry or rewrite upstream failures.

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::movie::{MovieDetail, MovieId, MovieSummary};
use crate::suggestion::Suggestion;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// The popular listing for `page`. No bounds check: zero and negative
    /// pages are passed through.
    async fn list_popular(&self, page: i64) -> CatalogResult<Vec<MovieSummary>>;

    /// Title search. An empty `query` is sent as-is.
    async fn search(&self, query: &str, page: i64) -> CatalogResult<Vec<MovieSummary>>;

    /// A single record with cast and crew embedded.
    async fn get_details(&self, id: &MovieId) -> CatalogResult<MovieDetail>;

    /// Mixed movie/person typeahead hits for `query`.
    async fn suggest(&self, query: &str) -> CatalogResult<Vec<Suggestion>>;
}
