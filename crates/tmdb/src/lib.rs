//! TMDB REST client library.
//!
//! Provides typed wire models and an HTTP client implementing the
//! [`jafflix_core::catalog::MovieCatalog`] contract.

pub mod api;
pub mod models;

pub use api::{TmdbApi, TmdbApiError, TmdbConfig};
