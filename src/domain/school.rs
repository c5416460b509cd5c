use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::SchoolId;

/// Display projection of a school listing as returned by the search API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSummary {
    #[serde(rename = "_id")]
    pub id: SchoolId,
    pub course: String,
    pub university: String,
    pub location: String,
    pub course_type: String,
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scholarship: bool,
    pub school_status: String,
    /// Identifier of the staff member who owns the listing.
    pub created_by: String,
}

/// One page of search results plus pagination metadata.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultPage {
    #[serde(default)]
    pub result: Vec<SchoolSummary>,
    #[serde(default)]
    pub total_schools: usize,
    /// Authoritative page count; never recomputed on the client.
    #[serde(default)]
    pub page_count: usize,
}

impl SearchResultPage {
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}
