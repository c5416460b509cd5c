//! reqwest-backed access to the remote listings API.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::domain::school::SearchResultPage;
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{SchoolReader, SchoolSearchQuery};

/// Longest error body kept in [`RepositoryError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Clone, Debug)]
pub struct HttpSchoolRepository {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSchoolRepository {
    /// Builds the HTTP client once from the startup configuration.
    pub fn new(config: &ClientConfig) -> RepositoryResult<Self> {
        let endpoint = schools_endpoint(&config.api_base_url, &config.schools_path)?;
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url_for(&self, query: &SchoolSearchQuery) -> Url {
        let mut url = self.endpoint.clone();
        let encoded = query.to_query_string();
        url.set_query((!encoded.is_empty()).then_some(encoded.as_str()));
        url
    }
}

#[async_trait]
impl SchoolReader for HttpSchoolRepository {
    async fn search_schools(&self, query: &SchoolSearchQuery) -> RepositoryResult<SearchResultPage> {
        let url = self.url_for(query);
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Joins the configured base URL and listings path, tolerating a missing
/// trailing slash on the base.
fn schools_endpoint(base: &str, path: &str) -> RepositoryResult<Url> {
    let mut base = Url::parse(base.trim())?;
    if base.cannot_be_a_base() {
        return Err(RepositoryError::InvalidUrl(base.to_string()));
    }
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilterRequest;
    use crate::domain::types::{CourseType, PageNumber};

    fn config(base: &str) -> ClientConfig {
        ClientConfig {
            api_base_url: base.to_string(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let repo = HttpSchoolRepository::new(&config("https://api.example.com/v1")).unwrap();
        assert_eq!(repo.endpoint().as_str(), "https://api.example.com/v1/schools");

        let repo = HttpSchoolRepository::new(&config("https://api.example.com/v1/")).unwrap();
        assert_eq!(repo.endpoint().as_str(), "https://api.example.com/v1/schools");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpSchoolRepository::new(&config("not a url")).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidUrl(_)));
    }

    #[test]
    fn request_url_carries_encoded_filter() {
        let repo = HttpSchoolRepository::new(&config("http://localhost:8080/api")).unwrap();
        let filter = FilterRequest::new()
            .course_type(CourseType::new("Masters").unwrap())
            .paginate(PageNumber::new(2).unwrap());
        let url = repo.url_for(&SchoolSearchQuery::new(filter));
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/schools?courseType=Masters&page=2"
        );

        let url = repo.url_for(&SchoolSearchQuery::new(FilterRequest::new()));
        assert_eq!(url.as_str(), "http://localhost:8080/api/schools");
    }
}
