use serde::Serialize;

use crate::domain::school::{SchoolSummary, SearchResultPage};

/// Severity of a transient [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Transient user-facing message, shown once and then dismissed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Snapshot of the search state shared by the form, the result list and the
/// paginator. Only [`crate::services::search::SearchContext`] writes it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    /// Flips to `true` on the first request and never resets.
    pub has_searched: bool,
    pub search_loading: bool,
    /// Latest applied page; replaced wholesale, never merged.
    pub search_results: Option<SearchResultPage>,
    pub notice: Option<Notice>,
}

impl UiState {
    /// Page count reported by the API for the held results.
    pub fn page_count(&self) -> usize {
        self.search_results
            .as_ref()
            .map(|page| page.page_count)
            .unwrap_or(0)
    }

    pub fn results_view(&self) -> ResultsView<'_> {
        ResultsView::from(self)
    }
}

/// What the result list shows for a given [`UiState`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsView<'a> {
    /// Nothing was searched yet.
    StartYourSearch,
    /// First request in flight, nothing to show yet.
    Loading,
    /// The API answered with an empty page.
    NoSchoolsFound,
    Schools {
        schools: &'a [SchoolSummary],
        total: usize,
    },
}

impl<'a> From<&'a UiState> for ResultsView<'a> {
    fn from(state: &'a UiState) -> Self {
        match (&state.search_results, state.has_searched) {
            (_, false) => ResultsView::StartYourSearch,
            (None, true) if state.search_loading => ResultsView::Loading,
            (None, true) => ResultsView::NoSchoolsFound,
            (Some(page), true) if page.is_empty() => ResultsView::NoSchoolsFound,
            (Some(page), true) => ResultsView::Schools {
                schools: &page.result,
                total: page.total_schools,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_asks_user_to_start() {
        let state = UiState::default();
        assert_eq!(state.results_view(), ResultsView::StartYourSearch);
        assert_eq!(state.page_count(), 0);
    }

    #[test]
    fn empty_page_is_not_the_start_state() {
        let state = UiState {
            has_searched: true,
            search_results: Some(SearchResultPage::default()),
            ..UiState::default()
        };
        assert_eq!(state.results_view(), ResultsView::NoSchoolsFound);
    }

    #[test]
    fn first_request_in_flight_shows_loading() {
        let state = UiState {
            has_searched: true,
            search_loading: true,
            ..UiState::default()
        };
        assert_eq!(state.results_view(), ResultsView::Loading);
    }
}
