//! Query-string codec for search filters.
//!
//! [`QueryParams`] is the "current query" value object: the address bar (or a
//! deep link passed on the command line) is only ever parsed into it or
//! rendered from it. Decoding never fails; unreadable values are dropped and
//! read back as "no filter on this dimension".

use std::str::FromStr;

use url::form_urlencoded;

use crate::domain::filter::{ContactInfo, FilterRequest};
use crate::domain::types::{ContactEmail, ContactPhone, PageNumber};

pub const SEARCH_KEY: &str = "search";
pub const COURSE_TYPE_KEY: &str = "courseType";
pub const SCHOOL_STATUS_KEY: &str = "schoolStatus";
pub const SORT_KEY: &str = "sort";
pub const MIN_TUITION_KEY: &str = "minTuition";
pub const MAX_TUITION_KEY: &str = "maxTuition";
pub const SCHOLARSHIP_KEY: &str = "scholarship";
pub const PAGE_KEY: &str = "page";
pub const EMAIL_KEY: &str = "email";
pub const PHONE_KEY: &str = "phone";

/// Ordered string key/value pairs of a query string. Keys are unique and
/// values are never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`.
    ///
    /// Empty values are dropped and a repeated key keeps its last value.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key.is_empty() {
                continue;
            }
            params.set(key.into_owned(), value.into_owned());
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrites `key` in place, appends it when missing, and removes it
    /// when `value` is blank.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.remove(&key);
            return;
        }
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy with `page` overwritten; every other key is kept.
    pub fn with_page(&self, page: PageNumber) -> Self {
        let mut params = self.clone();
        params.set(PAGE_KEY, page.to_string());
        params
    }

    /// The requested page, falling back to page 1 when absent or invalid.
    pub fn page(&self) -> PageNumber {
        self.typed(PAGE_KEY).unwrap_or_default()
    }

    /// Reads the recognised filter keys into a [`FilterRequest`]. Unknown
    /// keys are ignored and invalid values read as absent.
    pub fn to_filter(&self) -> FilterRequest {
        FilterRequest {
            search: self.typed(SEARCH_KEY),
            course_type: self.typed(COURSE_TYPE_KEY),
            school_status: self.typed(SCHOOL_STATUS_KEY),
            sort: self.typed(SORT_KEY),
            min_tuition: self.typed(MIN_TUITION_KEY),
            max_tuition: self.typed(MAX_TUITION_KEY),
            scholarship: self.typed(SCHOLARSHIP_KEY).unwrap_or_default(),
            page: self.typed(PAGE_KEY),
        }
    }

    /// Contact details carried by the query, when both are present.
    pub fn contact(&self) -> Option<ContactInfo> {
        let email = self.typed::<ContactEmail>(EMAIL_KEY)?;
        let phone = self.typed::<ContactPhone>(PHONE_KEY)?;
        Some(ContactInfo::new(email, phone))
    }

    /// Adds the contact keys after the filter keys.
    pub fn with_contact(mut self, contact: &ContactInfo) -> Self {
        self.set(EMAIL_KEY, contact.email.as_str());
        self.set(PHONE_KEY, contact.phone.as_str());
        self
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    fn typed<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::debug!("Ignoring unreadable query value {key}={raw}");
                None
            }
        }
    }
}

impl From<&FilterRequest> for QueryParams {
    fn from(filter: &FilterRequest) -> Self {
        let mut params = QueryParams::new();
        if let Some(search) = &filter.search {
            params.set(SEARCH_KEY, search.as_str());
        }
        if let Some(course_type) = &filter.course_type {
            params.set(COURSE_TYPE_KEY, course_type.as_str());
        }
        if let Some(school_status) = &filter.school_status {
            params.set(SCHOOL_STATUS_KEY, school_status.as_str());
        }
        if let Some(sort) = &filter.sort {
            params.set(SORT_KEY, sort.as_str());
        }
        if let Some(min) = filter.min_tuition {
            params.set(MIN_TUITION_KEY, min.to_string());
        }
        if let Some(max) = filter.max_tuition {
            params.set(MAX_TUITION_KEY, max.to_string());
        }
        if let Some(flag) = filter.scholarship.as_flag() {
            params.set(SCHOLARSHIP_KEY, flag.to_string());
        }
        if let Some(page) = filter.page {
            params.set(PAGE_KEY, page.to_string());
        }
        params
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Serializes a filter into a query string, omitting unset dimensions.
pub fn encode(filter: &FilterRequest) -> String {
    QueryParams::from(filter).to_query_string()
}

/// Serializes a filter followed by the optional lead-capture contact.
pub fn encode_with_contact(filter: &FilterRequest, contact: Option<&ContactInfo>) -> String {
    let params = QueryParams::from(filter);
    match contact {
        Some(contact) => params.with_contact(contact).to_query_string(),
        None => params.to_query_string(),
    }
}

/// Parses a query string into plain string pairs.
pub fn decode(query: &str) -> QueryParams {
    QueryParams::parse(query)
}
