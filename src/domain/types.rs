//! Strongly-typed value objects used by search filters and listings.
//!
//! These wrappers enforce basic invariants (trimmed non-empty text, positive
//! page numbers, non-negative tuition) so that once a value reaches a
//! [`FilterRequest`](crate::domain::filter::FilterRequest) it can be encoded
//! without further checks.
use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::{ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided page number was zero.
    #[error("page number must be greater than zero")]
    NonPositivePage,
    /// Provided value was not a non-negative whole number.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(SchoolId, "Identifier assigned to a school listing by the API.");

non_empty_string_newtype!(SearchText, "Free-text search term.");

non_empty_string_newtype!(
    CourseType,
    "Course type filter such as `Masters` or `Bachelors`."
);

non_empty_string_newtype!(SchoolStatus, "Degree level filter.");

non_empty_string_newtype!(SortKey, "Sort order requested from the listings API.");

non_empty_string_newtype!(
    ContactEmail,
    "Lead-capture email, free text but never blank."
);

non_empty_string_newtype!(
    ContactPhone,
    "Lead-capture phone, free text but never blank."
);

/// Non-negative tuition amount in whole currency units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuition(u64);

impl Tuition {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw amount.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for Tuition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Tuition {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidNumber(trimmed.to_string()))
    }
}

impl From<u64> for Tuition {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One-based page index. Page 1 is assumed whenever no page is requested.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Creates a page number ensuring it is greater than zero.
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(TypeConstraintError::NonPositivePage)
    }

    /// Returns the raw one-based index.
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl Display for PageNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageNumber {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for usize {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

impl FromStr for PageNumber {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<usize>()
            .map_err(|_| TypeConstraintError::InvalidNumber(trimmed.to_string()))?;
        Self::new(value)
    }
}

/// Scholarship filter. `Any` means the user never picked a value and the key
/// is left out of the query entirely.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Scholarship {
    #[default]
    Any,
    Yes,
    No,
}

impl Scholarship {
    /// Maps an optional flag onto the tri-state filter.
    pub const fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            None => Self::Any,
            Some(true) => Self::Yes,
            Some(false) => Self::No,
        }
    }

    /// Returns `None` for [`Scholarship::Any`].
    pub const fn as_flag(self) -> Option<bool> {
        match self {
            Self::Any => None,
            Self::Yes => Some(true),
            Self::No => Some(false),
        }
    }

    pub const fn is_any(self) -> bool {
        matches!(self, Self::Any)
    }
}

impl FromStr for Scholarship {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Self::Any),
            "true" => Ok(Self::Yes),
            "false" => Ok(Self::No),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_newtypes_trim_and_reject_blank() {
        assert_eq!(CourseType::new("  Masters ").unwrap().as_str(), "Masters");
        assert_eq!(
            SearchText::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn tuition_parses_whole_numbers_only() {
        assert_eq!(" 12000 ".parse::<Tuition>().unwrap().get(), 12000);
        assert!(matches!(
            "-5".parse::<Tuition>(),
            Err(TypeConstraintError::InvalidNumber(_))
        ));
        assert!(matches!(
            "12.5".parse::<Tuition>(),
            Err(TypeConstraintError::InvalidNumber(_))
        ));
    }

    #[test]
    fn page_number_rejects_zero() {
        assert_eq!(PageNumber::new(0), Err(TypeConstraintError::NonPositivePage));
        assert_eq!("3".parse::<PageNumber>().unwrap().get(), 3);
        assert_eq!(PageNumber::default(), PageNumber::FIRST);
    }

    #[test]
    fn scholarship_is_tri_state() {
        assert_eq!("".parse::<Scholarship>().unwrap(), Scholarship::Any);
        assert_eq!("true".parse::<Scholarship>().unwrap(), Scholarship::Yes);
        assert_eq!("false".parse::<Scholarship>().unwrap(), Scholarship::No);
        assert!("maybe".parse::<Scholarship>().is_err());
        assert_eq!(Scholarship::No.as_flag(), Some(false));
        assert_eq!(Scholarship::from_flag(None), Scholarship::Any);
    }
}
