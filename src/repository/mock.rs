//! Mock repository implementation for isolating the search context in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::school::SearchResultPage;
use crate::repository::errors::RepositoryResult;
use crate::repository::{SchoolReader, SchoolSearchQuery};

mock! {
    pub SchoolRepository {}

    #[async_trait]
    impl SchoolReader for SchoolRepository {
        async fn search_schools(
            &self,
            query: &SchoolSearchQuery,
        ) -> RepositoryResult<SearchResultPage>;
    }
}
