//! Detail view-state controller: one movie keyed by identifier.
//!
//! Fetches on mount and whenever the identifier changes. An empty identifier
//! never fetches. Success replaces `movie` wholesale; failure sets `error`
//! and leaves `movie` as it was. Same sequence guard as the list controller.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::catalog::MovieCatalog;
use crate::fetch::{error_message, FetchOutcome, RequestSequence};
use crate::movie::{MovieDetail, MovieId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailState {
    pub id: MovieId,
    pub movie: Option<MovieDetail>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DetailState {
    pub fn outcome(&self) -> FetchOutcome<&MovieDetail> {
        if self.loading {
            return FetchOutcome::Loading;
        }
        if let Some(err) = &self.error {
            return FetchOutcome::Error(err.clone());
        }
        match &self.movie {
            Some(movie) => FetchOutcome::Success(movie),
            None => FetchOutcome::Idle,
        }
    }
}

struct Inner {
    catalog: Arc<dyn MovieCatalog>,
    sequence: RequestSequence,
    state: watch::Sender<DetailState>,
}

/// Owns one detail view's state. Must be created inside a Tokio runtime.
pub struct DetailController {
    inner: Arc<Inner>,
}

impl DetailController {
    pub fn new(catalog: Arc<dyn MovieCatalog>, id: impl Into<MovieId>) -> Self {
        let (state, _) = watch::channel(DetailState {
            id: id.into(),
            movie: None,
            loading: false,
            error: None,
        });
        let controller = Self {
            inner: Arc::new(Inner {
                catalog,
                sequence: RequestSequence::new(),
                state,
            }),
        };
        controller.commit(|_| true);
        controller
    }

    /// Switch to another movie. The same identifier again is not a change.
    pub fn set_id(&self, id: impl Into<MovieId>) {
        let id = id.into();
        self.commit(move |state| {
            if state.id == id {
                return false;
            }
            state.id = id;
            true
        });
    }

    pub fn snapshot(&self) -> DetailState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.inner.state.subscribe()
    }

    pub async fn settled(&self) -> DetailState {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|s| !s.loading).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    pub async fn settled_within(&self, budget: Duration) -> DetailState {
        match tokio::time::timeout(budget, self.settled()).await {
            Ok(state) => state,
            Err(_) => self.snapshot(),
        }
    }

    fn commit(&self, change: impl FnOnce(&mut DetailState) -> bool) {
        let mut request = None;
        self.inner.state.send_if_modified(|state| {
            if !change(state) {
                return false;
            }
            if state.id.is_empty() {
                // Nothing to fetch; anything still in flight is for an old id.
                self.inner.sequence.invalidate();
                state.loading = false;
                return true;
            }
            state.loading = true;
            state.error = None;
            request = Some((self.inner.sequence.next(), state.id.clone()));
            true
        });

        if let Some((ticket, id)) = request {
            self.spawn_fetch(ticket, id);
        }
    }

    fn spawn_fetch(&self, ticket: u64, id: MovieId) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tracing::debug!(ticket, movie_id = %id, "Fetching movie details");
            let result = inner.catalog.get_details(&id).await;

            inner.state.send_if_modified(|state| {
                if !inner.sequence.is_current(ticket) {
                    tracing::debug!(ticket, movie_id = %id, "Discarding superseded detail response");
                    return false;
                }
                state.loading = false;
                match result {
                    Ok(movie) => {
                        state.movie = Some(movie);
                        state.error = None;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, movie_id = %id, "Movie detail fetch failed");
                        state.error = Some(error_message(&err));
                    }
                }
                true
            });
        });
    }
}
