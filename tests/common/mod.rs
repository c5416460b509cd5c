//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use school_search::domain::school::{SchoolSummary, SearchResultPage};
use school_search::domain::types::SchoolId;
use school_search::repository::errors::{RepositoryError, RepositoryResult};
use school_search::repository::{SchoolReader, SchoolSearchQuery};
use tokio::sync::oneshot;

/// One scripted answer of [`ScriptedRepository`].
pub enum Scripted {
    Ready(RepositoryResult<SearchResultPage>),
    /// Resolves when the test sends on the paired channel.
    Gated(oneshot::Receiver<RepositoryResult<SearchResultPage>>),
}

/// Repository answering searches from a queue of scripted responses and
/// recording every query it receives.
pub struct ScriptedRepository {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<SchoolSearchQuery>>,
}

impl ScriptedRepository {
    pub fn new(responses: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SchoolSearchQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Waits until at least `count` searches reached the repository.
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls.lock().unwrap().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("search never reached the repository");
    }
}

#[async_trait]
impl SchoolReader for ScriptedRepository {
    async fn search_schools(&self, query: &SchoolSearchQuery) -> RepositoryResult<SearchResultPage> {
        self.calls.lock().unwrap().push(query.clone());
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(RepositoryError::Unexpected("gate dropped".into()))),
            None => Err(RepositoryError::Unexpected("no scripted response".into())),
        }
    }
}

/// Repository holding each search until the test releases the response for
/// the requested page, whatever order the searches arrive in.
pub struct PageGatedRepository {
    gates: Mutex<HashMap<usize, oneshot::Receiver<RepositoryResult<SearchResultPage>>>>,
    calls: Mutex<Vec<SchoolSearchQuery>>,
}

impl PageGatedRepository {
    pub fn new(
        gates: impl IntoIterator<Item = (usize, oneshot::Receiver<RepositoryResult<SearchResultPage>>)>,
    ) -> Self {
        Self {
            gates: Mutex::new(gates.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls.lock().unwrap().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("search never reached the repository");
    }
}

#[async_trait]
impl SchoolReader for PageGatedRepository {
    async fn search_schools(&self, query: &SchoolSearchQuery) -> RepositoryResult<SearchResultPage> {
        self.calls.lock().unwrap().push(query.clone());
        let page = query.filter.effective_page().get();
        let gate = self.gates.lock().unwrap().remove(&page);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(RepositoryError::Unexpected("gate dropped".into()))),
            None => Err(RepositoryError::Unexpected(format!("no gate for page {page}"))),
        }
    }
}

pub fn school(id: &str, course: &str) -> SchoolSummary {
    SchoolSummary {
        id: SchoolId::new(id).unwrap(),
        course: course.to_string(),
        university: "University of Leeds".to_string(),
        location: "Leeds, UK".to_string(),
        course_type: "Masters".to_string(),
        application_deadline: Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).single(),
        scholarship: false,
        school_status: "Postgraduate".to_string(),
        created_by: "staff-1".to_string(),
    }
}

pub fn result_page(ids: &[&str], total_schools: usize, page_count: usize) -> SearchResultPage {
    SearchResultPage {
        result: ids.iter().map(|id| school(id, &format!("Course {id}"))).collect(),
        total_schools,
        page_count,
    }
}

pub fn server_error() -> RepositoryError {
    RepositoryError::Status {
        status: 500,
        body: "internal error".to_string(),
    }
}
