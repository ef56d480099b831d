//! List view-state controller: popular listing and title search.
//!
//! State machine: `Loading -> {Success, Error}`, re-entered on mount and on
//! every committed change to `page` or `query`. Each change issues exactly
//! one catalog call on a spawned task. Responses are applied only when they
//! belong to the most recent request, so a slow response for an old query
//! can never overwrite the result of a newer one.
//!
//! On failure the previous `movies` stay in place and `error` carries the
//! message; the next successful fetch clears `error`.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::catalog::MovieCatalog;
use crate::fetch::{error_message, FetchOutcome, RequestSequence};
use crate::movie::MovieSummary;

/// Page and search text driving a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: i64,
    /// Empty means "browse popular".
    pub query: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            query: String::new(),
        }
    }
}

/// Everything a listing view renders from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListState {
    pub movies: Vec<MovieSummary>,
    pub loading: bool,
    pub error: Option<String>,
    pub page: i64,
    pub query: String,
}

impl ListState {
    fn from_query(q: ListQuery) -> Self {
        Self {
            movies: Vec::new(),
            loading: false,
            error: None,
            page: q.page,
            query: q.query,
        }
    }

    /// The single active outcome. Loading wins over a stale error or list.
    pub fn outcome(&self) -> FetchOutcome<&[MovieSummary]> {
        if self.loading {
            FetchOutcome::Loading
        } else if let Some(err) = &self.error {
            FetchOutcome::Error(err.clone())
        } else {
            FetchOutcome::Success(&self.movies)
        }
    }

    /// `true` when a search is active rather than the popular listing.
    pub fn is_search(&self) -> bool {
        !self.query.is_empty()
    }
}

#[derive(Debug)]
struct ListRequest {
    ticket: u64,
    page: i64,
    query: String,
}

struct Inner {
    catalog: Arc<dyn MovieCatalog>,
    sequence: RequestSequence,
    state: watch::Sender<ListState>,
}

/// Owns one listing's state. Must be created inside a Tokio runtime.
pub struct ListController {
    inner: Arc<Inner>,
}

impl ListController {
    /// Create the controller and issue the mount fetch for `initial`.
    pub fn new(catalog: Arc<dyn MovieCatalog>, initial: ListQuery) -> Self {
        let (state, _) = watch::channel(ListState::from_query(initial));
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

    /// Move to `page`. Setting the current page again is not a change.
    pub fn set_page(&self, page: i64) {
        self.commit(|state| {
            if state.page == page {
                return false;
            }
            state.page = page;
            true
        });
    }

    /// Replace the search text. Setting the current text again is not a change.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.commit(move |state| {
            if state.query == query {
                return false;
            }
            state.query = query;
            true
        });
    }

    pub fn snapshot(&self) -> ListState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.inner.state.subscribe()
    }

    /// Wait until the latest request has resolved.
    pub async fn settled(&self) -> ListState {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let settled = rx.wait_for(|s| !s.loading).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Like [`settled`](Self::settled) but gives up after `budget`, returning
    /// whatever state exists at that point (possibly still loading).
    pub async fn settled_within(&self, budget: Duration) -> ListState {
        match tokio::time::timeout(budget, self.settled()).await {
            Ok(state) => state,
            Err(_) => self.snapshot(),
        }
    }

    /// Apply `change` and, if it reports a change, enter `Loading` and issue
    /// one request. Ticket, loading flag and request parameters are taken
    /// under the same lock as the change itself.
    fn commit(&self, change: impl FnOnce(&mut ListState) -> bool) {
        let mut request = None;
        self.inner.state.send_if_modified(|state| {
            if !change(state) {
                return false;
            }
            state.loading = true;
            state.error = None;
            request = Some(ListRequest {
                ticket: self.inner.sequence.next(),
                page: state.page,
                query: state.query.clone(),
            });
            true
        });

        if let Some(request) = request {
            self.spawn_fetch(request);
        }
    }

    fn spawn_fetch(&self, request: ListRequest) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tracing::debug!(
                ticket = request.ticket,
                page = request.page,
                query = %request.query,
                "Fetching movie list"
            );

            let result = if request.query.is_empty() {
                inner.catalog.list_popular(request.page).await
            } else {
                inner.catalog.search(&request.query, request.page).await
            };

            inner.state.send_if_modified(|state| {
                if !inner.sequence.is_current(request.ticket) {
                    tracing::debug!(ticket = request.ticket, "Discarding superseded list response");
                    return false;
                }
                state.loading = false;
                match result {
                    Ok(movies) => {
                        state.movies = movies;
                        state.error = None;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, query = %request.query, "Movie list fetch failed");
                        state.error = Some(error_message(&err));
                    }
                }
                true
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::testing::{summary, Call, FakeCatalog};

    fn controller(catalog: &Arc<FakeCatalog>, initial: ListQuery) -> ListController {
        ListController::new(Arc::clone(catalog) as Arc<dyn MovieCatalog>, initial)
    }

    #[tokio::test]
    async fn mount_with_empty_query_lists_popular() {
        let catalog = Arc::new(FakeCatalog::default());
        let list = controller(&catalog, ListQuery::default());

        let state = list.settled().await;

        assert_eq!(catalog.calls(), vec![Call::Popular(1)]);
        assert!(!state.loading);
        assert_eq!(state.movies, vec![summary(1, "popular p1")]);
    }

    #[tokio::test]
    async fn search_receives_exact_query_and_page() {
        let catalog = Arc::new(FakeCatalog::default());
        let list = controller(&catalog, ListQuery::default());
        list.settled().await;

        list.set_page(2);
        list.settled().await;
        list.set_query("Inception");
        let state = list.settled().await;

        assert_eq!(
            catalog.calls().last(),
            Some(&Call::Search("Inception".into(), 2))
        );
        assert_eq!(state.movies, vec![summary(2, "Inception p2")]);
    }

    #[tokio::test]
    async fn one_request_per_committed_change() {
        let catalog = Arc::new(FakeCatalog::default());
        let list = controller(&catalog, ListQuery::default());
        list.settled().await;

        list.set_page(1);
        list.set_query("");
        list.settled().await;
        assert_eq!(catalog.calls().len(), 1, "unchanged values must not refetch");

        list.set_page(3);
        list.settled().await;
        list.set_query("Heat");
        list.settled().await;
        list.set_query("Heat");
        list.settled().await;

        assert_eq!(
            catalog.calls(),
            vec![
                Call::Popular(1),
                Call::Popular(3),
                Call::Search("Heat".into(), 3),
            ]
        );
    }

    #[tokio::test]
    async fn non_positive_pages_are_passed_through() {
        let catalog = Arc::new(FakeCatalog::default());
        let list = controller(&catalog, ListQuery { page: 0, query: String::new() });
        list.settled().await;
        list.set_page(-3);
        list.settled().await;

        assert_eq!(catalog.calls(), vec![Call::Popular(0), Call::Popular(-3)]);
    }

    #[tokio::test]
    async fn failure_sets_error_and_keeps_previous_movies() {
        let catalog = Arc::new(
            FakeCatalog::default().failing("boom", "Request failed with status code 500"),
        );
        let list = controller(&catalog, ListQuery::default());
        let before = list.settled().await;

        list.set_query("boom");
        let state = list.settled().await;

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Request failed with status code 500"));
        assert_eq!(state.movies, before.movies);
        assert_matches!(state.outcome(), FetchOutcome::Error(_));
    }

    #[tokio::test]
    async fn success_after_failure_clears_error() {
        let catalog = Arc::new(FakeCatalog::default().failing("boom", "down"));
        let list = controller(&catalog, ListQuery { page: 1, query: "boom".into() });
        assert!(list.settled().await.error.is_some());

        list.set_query("Alien");
        let state = list.settled().await;

        assert_eq!(state.error, None);
        assert_eq!(state.movies, vec![summary(1, "Alien p1")]);
    }

    #[tokio::test]
    async fn entering_loading_clears_error_immediately() {
        let catalog = Arc::new(
            FakeCatalog::default()
                .failing("boom", "down")
                .delayed("slow", Duration::from_millis(50)),
        );
        let list = controller(&catalog, ListQuery { page: 1, query: "boom".into() });
        assert!(list.settled().await.error.is_some());

        list.set_query("slow");
        let state = list.snapshot();

        assert!(state.loading);
        assert_eq!(state.error, None);
        assert_matches!(state.outcome(), FetchOutcome::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_never_overwrites_newer_result() {
        let catalog = Arc::new(
            FakeCatalog::default()
                .delayed("Inc", Duration::from_millis(500))
                .delayed("Inception", Duration::from_millis(10)),
        );
        let list = controller(&catalog, ListQuery::default());

        list.set_query("Inc");
        list.set_query("Inception");
        let state = list.settled().await;
        assert_eq!(state.movies, vec![summary(1, "Inception p1")]);

        // Let the slow "Inc" response arrive.
        tokio::time::sleep(Duration::from_secs(1)).await;

        let state = list.snapshot();
        assert_eq!(state.query, "Inception");
        assert_eq!(state.movies, vec![summary(1, "Inception p1")]);
        assert_eq!(catalog.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn settled_within_returns_loading_state_when_budget_elapses() {
        let catalog = Arc::new(FakeCatalog::default().delayed("", Duration::from_secs(5)));
        let list = controller(&catalog, ListQuery::default());

        let state = list.settled_within(Duration::from_millis(100)).await;

        assert!(state.loading);
        assert_matches!(state.outcome(), FetchOutcome::Loading);
    }

    #[tokio::test]
    async fn subscribers_see_each_transition() {
        let catalog = Arc::new(FakeCatalog::default());
        let list = controller(&catalog, ListQuery::default());
        let mut rx = list.subscribe();
        list.settled().await;

        list.set_query("Heat");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().query, "Heat");

        let settled = rx.wait_for(|s| !s.loading).await.unwrap().clone();
        assert_eq!(settled.movies, vec![summary(1, "Heat p1")]);
    }
}
