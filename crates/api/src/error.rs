use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jafflix_core::error::{CatalogError, CoreError};
use serde_json::json;

use crate::auth::session::SessionError;
use crate::views;

/// Application-level error type for JSON handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `jafflix_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed call against the movie catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Session resolution failed (not the same as "not signed in").
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Catalog errors: the upstream message passes through ---
            AppError::Catalog(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            AppError::Catalog(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "Catalog request failed");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
            }

            // --- Session resolution ---
            AppError::Session(err) => {
                tracing::error!(error = %err, "Session resolution failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AUTH_ERROR",
                    "Authentication failed".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Errors rendered as full HTML pages by the page handlers.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Page not found")]
    NotFound,

    /// Session resolution failed while gating a page.
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, views::errors::not_found_page()).into_response()
            }
            PageError::Auth(msg) => {
                tracing::error!(error = %msg, "Page gate failed to resolve session");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::errors::auth_error_page(),
                )
                    .into_response()
            }
        }
    }
}
