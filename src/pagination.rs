use serde::Serialize;

use crate::domain::types::PageNumber;
use crate::dto::search::UiState;
use crate::query::QueryParams;
use crate::repository::SchoolReader;
use crate::services::search::{RequestOutcome, SearchContext};

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current + 1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page controls to render. `pages` is empty when there is a single page
/// or none; `None` entries mark an ellipsis gap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl PageLinks {
    pub fn new(current_page: PageNumber, page_count: usize) -> Self {
        let page = current_page.get();
        if page_count <= 1 {
            return Self { pages: vec![], page };
        }

        // A deep link may point past the last page; window around the last
        // page instead so every page stays reachable.
        let anchor = page.min(page_count);
        Self {
            pages: get_pages(page_count, anchor, 2, 2, 4, 2),
            page,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// A page switch that was shown before its request finished.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "settle the transition once its request finishes"]
pub struct PendingPage {
    pub target: PageNumber,
    previous_page: PageNumber,
    previous_query: QueryParams,
}

/// Tracks the current page and turns page clicks into searches.
///
/// The paginator keeps no filter of its own: the current query decides what
/// is searched, with only `page` overwritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paginator {
    current_page: PageNumber,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts on the page named by a deep link.
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            current_page: query.page(),
        }
    }

    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    /// Back to page 1, used when a fresh search is submitted from the form.
    pub fn reset(&mut self) {
        self.current_page = PageNumber::FIRST;
    }

    pub fn links(&self, state: &UiState) -> PageLinks {
        PageLinks::new(self.current_page, state.page_count())
    }

    /// Moves to `target` immediately and writes it into the current query.
    pub fn select(&mut self, target: PageNumber, query: &mut QueryParams) -> PendingPage {
        let pending = PendingPage {
            target,
            previous_page: self.current_page,
            previous_query: query.clone(),
        };
        *query = query.with_page(target);
        self.current_page = target;
        pending
    }

    /// Rolls a failed transition back. Applied and superseded requests keep
    /// the selected page.
    pub fn settle(&mut self, pending: PendingPage, outcome: RequestOutcome, query: &mut QueryParams) {
        if outcome != RequestOutcome::Failed {
            return;
        }
        log::warn!(
            "Page {} failed to load, back to page {}",
            pending.target,
            pending.previous_page
        );
        if self.current_page == pending.target {
            self.current_page = pending.previous_page;
        }
        if query.page() == pending.target {
            *query = pending.previous_query;
        }
    }

    /// Selects `target`, searches with the updated query and settles the
    /// transition. Re-selecting the current page still searches again.
    pub async fn go_to<R>(
        &mut self,
        target: PageNumber,
        query: &mut QueryParams,
        context: &SearchContext<R>,
    ) -> RequestOutcome
    where
        R: SchoolReader + ?Sized,
    {
        let pending = self.select(target, query);
        let outcome = context.request(query.to_filter(), None).await;
        self.settle(pending, outcome, query);
        outcome
    }
}
