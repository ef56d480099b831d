//! Per-controller fetch outcome and the request sequence guard.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::CatalogError;

/// Message shown when a failure carries no text of its own.
pub const GENERIC_FETCH_ERROR: &str = "Something went wrong";

/// Exactly one of these is active per controller at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

/// Human-readable message for a failed fetch: the upstream text when there is
/// one, otherwise [`GENERIC_FETCH_ERROR`].
pub fn error_message(err: &CatalogError) -> String {
    let msg = err.to_string();
    if msg.trim().is_empty() {
        GENERIC_FETCH_ERROR.to_string()
    } else {
        msg
    }
}

/// Monotonically increasing request counter.
///
/// Each fetch takes a ticket from [`RequestSequence::next`]; on arrival the
/// result is applied only if [`RequestSequence::is_current`] still holds for
/// that ticket. Superseded responses are dropped.
#[derive(Debug, Default)]
pub struct RequestSequence(AtomicU64);

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }

    /// Invalidate every outstanding ticket without issuing a new request.
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}
