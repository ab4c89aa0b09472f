use std::fmt;
use std::str::FromStr;

use super::{DomainError, Semester, YearOfStudy};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseCode(String);

impl CourseCode {
    pub const MAX_LEN: usize = 20;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        let valid = !trimmed.is_empty()
            && trimmed.len() <= Self::MAX_LEN
            && trimmed.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid {
            return Err(DomainError::InvalidCourseCode(value));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// For codes compiled into the binary, which are known to be valid.
    pub(crate) fn from_static(value: &'static str) -> Self {
        debug_assert!(Self::new(value).is_ok(), "invalid built-in course code {value}");
        Self(value.to_string())
    }

    /// Prerequisite columns use `None` for "no prerequisite".
    pub fn optional(value: &str) -> Result<Option<Self>, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        Self::new(trimmed).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CourseCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CreditHours(u16);

impl CreditHours {
    pub const MAX: u16 = 30;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        u16::try_from(value)
            .ok()
            .filter(|hours| *hours <= Self::MAX)
            .map(Self)
            .ok_or(DomainError::InvalidCreditHours(value))
    }

    pub(crate) const fn from_static(value: u16) -> Self {
        Self(value)
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl std::iter::Sum for CreditHours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|hours| hours.0).sum())
    }
}

/// One course as listed in the curriculum. Offerings are plain values:
/// whether a student picked one lives in [`super::CourseSelection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOffering {
    pub code: CourseCode,
    pub name: String,
    pub ects: u16,
    pub credit_hours: CreditHours,
    pub lecture_hours: u16,
    pub lab_hours: u16,
    pub tutorial_hours: u16,
    pub department: String,
    pub year_of_study: YearOfStudy,
    pub semester: Semester,
    pub prerequisite: Option<CourseCode>,
}
