use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ContactEmail, ContactPhone, CourseType, PageNumber, Scholarship, SchoolStatus, SearchText,
    SortKey, Tuition,
};

/// Structured search criteria sent to the listings API.
///
/// Every dimension is optional; an unset field means "no filter on this
/// dimension" and is left out of the encoded query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    pub search: Option<SearchText>,
    pub course_type: Option<CourseType>,
    pub school_status: Option<SchoolStatus>,
    pub sort: Option<SortKey>,
    pub min_tuition: Option<Tuition>,
    pub max_tuition: Option<Tuition>,
    pub scholarship: Scholarship,
    /// Requested page; `None` is read as page 1.
    pub page: Option<PageNumber>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: SearchText) -> Self {
        self.search = Some(search);
        self
    }

    pub fn course_type(mut self, course_type: CourseType) -> Self {
        self.course_type = Some(course_type);
        self
    }

    pub fn school_status(mut self, school_status: SchoolStatus) -> Self {
        self.school_status = Some(school_status);
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn tuition_range(mut self, min: Option<Tuition>, max: Option<Tuition>) -> Self {
        self.min_tuition = min;
        self.max_tuition = max;
        self
    }

    pub fn scholarship(mut self, scholarship: Scholarship) -> Self {
        self.scholarship = scholarship;
        self
    }

    pub fn paginate(mut self, page: PageNumber) -> Self {
        self.page = Some(page);
        self
    }

    /// Page the API is expected to return.
    pub fn effective_page(&self) -> PageNumber {
        self.page.unwrap_or_default()
    }

    /// True when no filter dimension is set. The page number does not count
    /// as a filter.
    pub fn has_no_filters(&self) -> bool {
        self.search.is_none()
            && self.course_type.is_none()
            && self.school_status.is_none()
            && self.sort.is_none()
            && self.min_tuition.is_none()
            && self.max_tuition.is_none()
            && self.scholarship.is_any()
    }

    /// Both tuition bounds are present and `min > max`. Such requests are
    /// still sent; the API decides what an empty range means.
    pub fn has_inverted_tuition_range(&self) -> bool {
        matches!(
            (self.min_tuition, self.max_tuition),
            (Some(min), Some(max)) if min > max
        )
    }
}

/// Lead-capture details submitted together with a search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: ContactEmail,
    pub phone: ContactPhone,
}

impl ContactInfo {
    pub fn new(email: ContactEmail, phone: ContactPhone) -> Self {
        Self { email, phone }
    }
}
