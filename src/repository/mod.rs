use async_trait::async_trait;

use crate::{
    domain::{
        filter::{ContactInfo, FilterRequest},
        school::SearchResultPage,
    },
    query::QueryParams,
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpSchoolRepository;

/// One outbound search: the filter plus the optional lead-capture contact.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolSearchQuery {
    pub filter: FilterRequest,
    pub contact: Option<ContactInfo>,
}

impl SchoolSearchQuery {
    pub fn new(filter: FilterRequest) -> Self {
        Self {
            filter,
            contact: None,
        }
    }

    pub fn contact(mut self, contact: ContactInfo) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Query string sent to the listings endpoint.
    pub fn to_query_string(&self) -> String {
        let params = QueryParams::from(&self.filter);
        match &self.contact {
            Some(contact) => params.with_contact(contact).to_query_string(),
            None => params.to_query_string(),
        }
    }
}

#[async_trait]
pub trait SchoolReader: Send + Sync {
    async fn search_schools(&self, query: &SchoolSearchQuery) -> RepositoryResult<SearchResultPage>;
}
