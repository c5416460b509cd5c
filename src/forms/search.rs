//! Search form: raw input fields plus the submit state machine.

use serde::Deserialize;
use tokio::task::JoinHandle;
use validator::{Validate, ValidationError};

use crate::domain::filter::{ContactInfo, FilterRequest};
use crate::domain::types::{
    ContactEmail, ContactPhone, CourseType, Scholarship, SchoolStatus, SearchText, SortKey,
    Tuition,
};
use crate::dto::search::Notice;
use crate::forms::FormError;
use crate::query::{self, QueryParams};
use crate::repository::SchoolReader;
use crate::services::search::{RequestOutcome, SearchContext};

/// Shown when the fail-fast guard rejects a submit.
pub const MISSING_CRITERIA_MESSAGE: &str =
    "Please choose at least one search option and enter your email and phone number.";

/// Shown when a tuition bound is not a whole, non-negative amount.
pub const INVALID_TUITION_MESSAGE: &str = "Tuition must be a whole, non-negative amount.";

/// Shown when the scholarship choice is not one of the offered values.
pub const INVALID_SCHOLARSHIP_MESSAGE: &str = "Please pick a valid scholarship option.";

/// Viewports narrower than this many pixels collapse the form after submit.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq, Eq)]
#[validate(schema(function = "validate_has_filter", skip_on_field_errors = false))]
#[serde(rename_all = "camelCase", default)]
/// Raw search form input, edited keystroke by keystroke.
pub struct SearchForm {
    pub search: String,
    pub course_type: String,
    pub school_status: String,
    pub sort: String,
    #[validate(custom(function = "validate_tuition"))]
    pub min_tuition: String,
    #[validate(custom(function = "validate_tuition"))]
    pub max_tuition: String,
    /// `""`, `"true"` or `"false"`.
    #[validate(custom(function = "validate_scholarship"))]
    pub scholarship: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub email: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub phone: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn validate_tuition(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.parse::<Tuition>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("tuition"))
    }
}

fn validate_scholarship(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Scholarship>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("scholarship"))
}

fn validate_has_filter(form: &SearchForm) -> Result<(), ValidationError> {
    if form.has_any_filter() {
        Ok(())
    } else {
        Err(ValidationError::new("no_filter"))
    }
}

fn optional<T, E>(value: &str, parse: impl FnOnce(&str) -> Result<T, E>) -> Result<Option<T>, E> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

impl SearchForm {
    /// True when at least one filter field carries a value.
    pub fn has_any_filter(&self) -> bool {
        [
            &self.search,
            &self.course_type,
            &self.school_status,
            &self.sort,
            &self.min_tuition,
            &self.max_tuition,
            &self.scholarship,
        ]
        .iter()
        .any(|value| !value.trim().is_empty())
    }

    /// Builds the filter from the current input. Blank fields are omitted.
    pub fn to_filter(&self) -> Result<FilterRequest, FormError> {
        let tuition = |value: &str| value.parse::<Tuition>().map_err(|_| FormError::InvalidTuition);
        Ok(FilterRequest {
            search: optional(&self.search, |v| SearchText::new(v))?,
            course_type: optional(&self.course_type, |v| CourseType::new(v))?,
            school_status: optional(&self.school_status, |v| SchoolStatus::new(v))?,
            sort: optional(&self.sort, |v| SortKey::new(v))?,
            min_tuition: optional(&self.min_tuition, tuition)?,
            max_tuition: optional(&self.max_tuition, tuition)?,
            scholarship: self.scholarship.parse()?,
            page: None,
        })
    }

    pub fn to_contact(&self) -> Result<ContactInfo, FormError> {
        let email = ContactEmail::new(self.email.as_str()).map_err(|_| FormError::InvalidEmail)?;
        let phone =
            ContactPhone::new(self.phone.as_str()).map_err(|_| FormError::InvalidPhoneNumber)?;
        Ok(ContactInfo::new(email, phone))
    }
}

/// Alert text for a rejected submit. Missing criteria or contact details take
/// precedence over malformed values.
fn rejection_message(err: &FormError) -> &'static str {
    match err {
        FormError::Validation(errors) => {
            let fields = errors.field_errors();
            let criteria_missing = errors.errors().contains_key("__all__")
                || fields.contains_key("email")
                || fields.contains_key("phone");
            if criteria_missing {
                MISSING_CRITERIA_MESSAGE
            } else if fields.contains_key("min_tuition") || fields.contains_key("max_tuition") {
                INVALID_TUITION_MESSAGE
            } else if fields.contains_key("scholarship") {
                INVALID_SCHOLARSHIP_MESSAGE
            } else {
                MISSING_CRITERIA_MESSAGE
            }
        }
        FormError::InvalidTuition => INVALID_TUITION_MESSAGE,
        FormError::TypeConstraint(_) => INVALID_SCHOLARSHIP_MESSAGE,
        FormError::InvalidEmail | FormError::InvalidPhoneNumber => MISSING_CRITERIA_MESSAGE,
    }
}

impl From<&QueryParams> for SearchForm {
    /// Prefills the form from a deep link.
    fn from(params: &QueryParams) -> Self {
        let field = |key: &str| params.get(key).unwrap_or_default().to_string();
        Self {
            search: field(query::SEARCH_KEY),
            course_type: field(query::COURSE_TYPE_KEY),
            school_status: field(query::SCHOOL_STATUS_KEY),
            sort: field(query::SORT_KEY),
            min_tuition: field(query::MIN_TUITION_KEY),
            max_tuition: field(query::MAX_TUITION_KEY),
            scholarship: field(query::SCHOLARSHIP_KEY),
            email: field(query::EMAIL_KEY),
            phone: field(query::PHONE_KEY),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Editing,
    Submitting,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

impl Viewport {
    pub fn from_width(width_px: u32) -> Self {
        if width_px < MOBILE_BREAKPOINT_PX {
            Viewport::Mobile
        } else {
            Viewport::Desktop
        }
    }
}

/// Result of an accepted submit. The search runs in the background.
#[derive(Debug)]
pub struct Submission {
    /// New current query for the address bar; contact details are left out.
    pub query: QueryParams,
    pub handle: JoinHandle<RequestOutcome>,
}

/// Owns the search form input and hands finished filters to the
/// [`SearchContext`].
#[derive(Debug, Default)]
pub struct SearchFormController {
    form: SearchForm,
    state: FormState,
    viewport: Viewport,
    collapsed: bool,
    alert: Option<Notice>,
}

impl SearchFormController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn alert(&self) -> Option<&Notice> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if viewport == Viewport::Desktop {
            self.collapsed = false;
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed && self.viewport == Viewport::Mobile;
    }

    /// Resets every field. Does not start a search.
    pub fn clear_all(&mut self) {
        self.form = SearchForm::default();
        self.alert = None;
    }

    /// Validates the input and, when accepted, starts a search without
    /// waiting for it. Rejected input never reaches the context.
    pub fn submit<R>(&mut self, context: &SearchContext<R>) -> Result<Submission, FormError>
    where
        R: SchoolReader + ?Sized + 'static,
    {
        self.state = FormState::Submitting;
        let prepared = self
            .form
            .validate()
            .map_err(FormError::from)
            .and_then(|_| Ok((self.form.to_filter()?, self.form.to_contact()?)));

        let (filter, contact) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                log::warn!("Rejected search form: {err}");
                self.alert = Some(Notice::warning(rejection_message(&err)));
                self.state = FormState::Editing;
                return Err(err);
            }
        };

        self.alert = None;
        let query = QueryParams::from(&filter);
        let handle = context.dispatch(filter, Some(contact));
        if self.viewport == Viewport::Mobile {
            self.collapsed = true;
        }
        self.state = FormState::Editing;

        Ok(Submission { query, handle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> SearchForm {
        SearchForm {
            course_type: "Masters".into(),
            email: "a@b.com".into(),
            phone: "123".into(),
            ..SearchForm::default()
        }
    }

    #[test]
    fn accepts_one_filter_with_contact() {
        let form = filled_form();
        assert!(form.validate().is_ok());
        assert_eq!(
            form.to_filter().unwrap(),
            FilterRequest::new().course_type(CourseType::new("Masters").unwrap())
        );
        assert_eq!(form.to_contact().unwrap().email.as_str(), "a@b.com");
    }

    #[test]
    fn rejects_empty_form() {
        let errors = SearchForm::default().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn rejects_contact_without_filters() {
        let form = SearchForm {
            email: "a@b.com".into(),
            phone: "123".into(),
            ..SearchForm::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn rejects_filters_without_contact() {
        let form = SearchForm {
            search: "law".into(),
            phone: "   ".into(),
            ..SearchForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn rejects_non_numeric_tuition() {
        let form = SearchForm {
            min_tuition: "ten".into(),
            ..filled_form()
        };
        assert!(form.validate().is_err());
        assert!(matches!(form.to_filter(), Err(FormError::InvalidTuition)));
    }

    #[test]
    fn scholarship_no_is_a_filter() {
        let form = SearchForm {
            course_type: String::new(),
            scholarship: "false".into(),
            ..filled_form()
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.to_filter().unwrap().scholarship, Scholarship::No);
    }

    #[test]
    fn rejection_message_names_the_problem() {
        let rejected = |form: SearchForm| {
            let err = form.validate().map_err(FormError::from).unwrap_err();
            rejection_message(&err)
        };

        assert_eq!(
            rejected(SearchForm {
                min_tuition: "ten".into(),
                ..filled_form()
            }),
            INVALID_TUITION_MESSAGE
        );
        assert_eq!(
            rejected(SearchForm {
                scholarship: "maybe".into(),
                ..filled_form()
            }),
            INVALID_SCHOLARSHIP_MESSAGE
        );
        assert_eq!(
            rejected(SearchForm {
                min_tuition: "ten".into(),
                email: String::new(),
                ..filled_form()
            }),
            MISSING_CRITERIA_MESSAGE
        );
        assert_eq!(rejected(SearchForm::default()), MISSING_CRITERIA_MESSAGE);
    }

    #[test]
    fn prefills_from_query() {
        let params = QueryParams::parse("courseType=Masters&email=a%40b.com&page=3");
        let form = SearchForm::from(&params);
        assert_eq!(form.course_type, "Masters");
        assert_eq!(form.email, "a@b.com");
        assert!(form.phone.is_empty());
    }

    #[test]
    fn clear_all_resets_fields() {
        let mut controller = SearchFormController::new(Viewport::Desktop);
        *controller.form_mut() = filled_form();
        controller.clear_all();
        assert_eq!(controller.form(), &SearchForm::default());
        assert_eq!(controller.state(), FormState::Editing);
    }

    #[test]
    fn collapse_only_applies_on_mobile() {
        let mut controller = SearchFormController::new(Viewport::from_width(1280));
        controller.toggle_collapsed();
        assert!(!controller.is_collapsed());

        controller.set_viewport(Viewport::from_width(375));
        controller.toggle_collapsed();
        assert!(controller.is_collapsed());

        controller.set_viewport(Viewport::Desktop);
        assert!(!controller.is_collapsed());
    }
}
