//! Plain-text rendering of the result list and page controls.

use tera::{Context, Tera};

use crate::dto::search::UiState;
use crate::pagination::Paginator;

const RESULTS_TEMPLATE_NAME: &str = "search/results.txt";
const RESULTS_TEMPLATE: &str = include_str!("../templates/search/results.txt");

pub struct SearchView {
    tera: Tera,
}

impl SearchView {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(RESULTS_TEMPLATE_NAME, RESULTS_TEMPLATE)?;
        Ok(Self { tera })
    }

    pub fn render(&self, state: &UiState, paginator: &Paginator) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("view", &state.results_view());
        context.insert("notice", &state.notice);
        context.insert("loading", &state.search_loading);
        context.insert("pages", &paginator.links(state));
        self.tera.render(RESULTS_TEMPLATE_NAME, &context)
    }
}
