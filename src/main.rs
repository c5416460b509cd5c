//! Command-line front end: runs one search for a query string and prints the
//! result list.
//!
//! ```text
//! school-search 'courseType=Masters&scholarship=true&page=2'
//! school-search 'courseType=Masters&email=a%40b.com&phone=123'
//! ```
//!
//! A query carrying `email` and `phone` is submitted through the search form;
//! anything else is treated as a deep link and loaded through the paginator.

use std::env;
use std::path::Path;
use std::sync::Arc;

use dotenvy::dotenv;

use school_search::forms::search::{SearchForm, SearchFormController, Viewport};
use school_search::models::config::ClientConfig;
use school_search::pagination::Paginator;
use school_search::query::QueryParams;
use school_search::repository::HttpSchoolRepository;
use school_search::services::search::SearchContext;
use school_search::views::SearchView;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match ClientConfig::load(Path::new("config"), &app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let repo = match HttpSchoolRepository::new(&config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Failed to build the API client: {err}");
            std::process::exit(1);
        }
    };

    let view = match SearchView::new() {
        Ok(view) => view,
        Err(err) => {
            log::error!("Template parsing error(s): {err}");
            std::process::exit(1);
        }
    };

    let context = SearchContext::new(Arc::new(repo));
    let mut query = QueryParams::parse(&env::args().nth(1).unwrap_or_default());
    let mut paginator = Paginator::from_query(&query);

    if query.contact().is_some() {
        let mut form = SearchFormController::new(Viewport::Desktop);
        *form.form_mut() = SearchForm::from(&query);

        let submission = match form.submit(&context) {
            Ok(submission) => submission,
            Err(err) => {
                if let Some(alert) = form.alert() {
                    eprintln!("{}", alert.message);
                }
                log::error!("Search form rejected: {err}");
                std::process::exit(1);
            }
        };

        query = submission.query;
        paginator.reset();
        if let Err(err) = submission.handle.await {
            log::error!("Search task failed: {err}");
        }
    } else {
        let page = query.page();
        paginator.go_to(page, &mut query, &context).await;
    }

    log::info!("Current query: ?{query}");

    match view.render(&context.snapshot(), &paginator) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            log::error!("Failed to render results: {err}");
            std::process::exit(1);
        }
    }
}
