//! The search context: single writer of [`UiState`].
//!
//! Every search goes through [`SearchContext::begin`], which synchronously
//! takes a ticket from a generation counter. When the response arrives it is
//! applied only if no newer request was issued in the meantime, so an older
//! response resolving late can never overwrite a newer one. Failures are absorbed here
//! and surfaced as a [`Notice`] on the shared state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::filter::{ContactInfo, FilterRequest};
use crate::dto::search::{Notice, UiState};
use crate::repository::{SchoolReader, SchoolSearchQuery};

/// Shown when a search request fails.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// What happened to a single request. Callers are free to ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The response was stored as the current results.
    Applied,
    /// A newer request was issued before this one resolved; its response was
    /// dropped.
    Superseded,
    /// The request failed; previous results were kept.
    Failed,
}

/// A search that was issued but not yet fetched. Produced by
/// [`SearchContext::begin`].
#[derive(Debug)]
#[must_use = "pass the ticket to `SearchContext::finish`"]
pub struct SearchTicket {
    generation: u64,
    query: SchoolSearchQuery,
}

impl SearchTicket {
    pub fn query(&self) -> &SchoolSearchQuery {
        &self.query
    }
}

struct Inner<R: ?Sized> {
    state: watch::Sender<UiState>,
    generation: AtomicU64,
    repo: Arc<R>,
}

/// Cloneable handle to the shared search state. Clones share the same state
/// and generation counter.
pub struct SearchContext<R: ?Sized> {
    inner: Arc<Inner<R>>,
}

impl<R: ?Sized> Clone for SearchContext<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ?Sized> std::fmt::Debug for SearchContext<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("state", &*self.inner.state.borrow())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish()
    }
}

impl<R> SearchContext<R>
where
    R: SchoolReader + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self {
            inner: Arc::new(Inner {
                state,
                generation: AtomicU64::new(0),
                repo,
            }),
        }
    }

    /// Read-only view of the state that is notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.inner.state.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> UiState {
        self.inner.state.borrow().clone()
    }

    /// Removes and returns the pending notice, if any.
    pub fn take_notice(&self) -> Option<Notice> {
        let mut notice = None;
        self.inner.state.send_if_modified(|state| {
            notice = state.notice.take();
            notice.is_some()
        });
        notice
    }

    /// Issues a search: takes the next generation ticket and raises the
    /// loading and has-searched flags. The fetch itself happens in
    /// [`SearchContext::finish`].
    pub fn begin(&self, filter: FilterRequest, contact: Option<ContactInfo>) -> SearchTicket {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if filter.has_inverted_tuition_range() {
            log::warn!(
                "Searching with minTuition {:?} above maxTuition {:?}",
                filter.min_tuition,
                filter.max_tuition
            );
        }

        let query = SchoolSearchQuery { filter, contact };
        log::info!(
            "Search #{generation} issued for page {}",
            query.filter.effective_page()
        );

        self.inner.state.send_modify(|state| {
            state.has_searched = true;
            state.search_loading = true;
        });

        SearchTicket { generation, query }
    }

    /// Fetches the ticket's query and stores the response if the ticket is
    /// still the newest one. On failure the previous results stay in place and
    /// a notice is posted.
    pub async fn finish(&self, ticket: SearchTicket) -> RequestOutcome {
        let SearchTicket { generation, query } = ticket;
        let result = self.inner.repo.search_schools(&query).await;

        let mut outcome = RequestOutcome::Superseded;
        self.inner.state.send_if_modified(|state| {
            // Compared under the state lock so a newer request cannot slip in
            // between the check and the write.
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            state.search_loading = false;
            match &result {
                Ok(page) => {
                    state.search_results = Some(page.clone());
                    outcome = RequestOutcome::Applied;
                }
                Err(_) => {
                    state.notice = Some(Notice::error(SEARCH_FAILED_MESSAGE));
                    outcome = RequestOutcome::Failed;
                }
            }
            true
        });

        match (&outcome, &result) {
            (RequestOutcome::Applied, Ok(page)) => log::info!(
                "Search #{generation} applied: {} of {} schools, {} pages",
                page.result.len(),
                page.total_schools,
                page.page_count
            ),
            (RequestOutcome::Failed, Err(err)) => {
                log::error!("Search #{generation} failed: {err}")
            }
            (RequestOutcome::Superseded, Err(err)) => {
                log::warn!("Search #{generation} failed after being superseded: {err}")
            }
            _ => log::debug!("Search #{generation} superseded, response dropped"),
        }

        outcome
    }

    /// Runs one search to completion: [`SearchContext::begin`] followed by
    /// [`SearchContext::finish`].
    pub async fn request(
        &self,
        filter: FilterRequest,
        contact: Option<ContactInfo>,
    ) -> RequestOutcome {
        let ticket = self.begin(filter, contact);
        self.finish(ticket).await
    }

    /// Issues the search right away and runs the fetch on the runtime without
    /// waiting for it. Requests are ordered by the time `dispatch` is called,
    /// not by when the spawned task first runs.
    pub fn dispatch(
        &self,
        filter: FilterRequest,
        contact: Option<ContactInfo>,
    ) -> JoinHandle<RequestOutcome>
    where
        R: 'static,
    {
        let ticket = self.begin(filter, contact);
        let context = self.clone();
        tokio::spawn(async move { context.finish(ticket).await })
    }
}
