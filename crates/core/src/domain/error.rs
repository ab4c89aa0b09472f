use thiserror::Error;

use super::{AssessmentKind, CourseCode, FieldErrors};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("invalid {kind} score: {value}. score must be in [0, {max}]")]
    InvalidScore {
        kind: AssessmentKind,
        value: f64,
        max: f64,
    },
    #[error("unknown assessment type: {0}")]
    UnknownAssessmentKind(String),
    #[error("unknown letter grade: {0}")]
    UnknownLetterGrade(String),
    #[error("invalid course code: {0:?}")]
    InvalidCourseCode(String),
    #[error("invalid credit hours: {0}. credit hours must be in [0, 30]")]
    InvalidCreditHours(i64),
    #[error("invalid academic year: {0:?}. expected YYYY/YYYY")]
    InvalidAcademicYear(String),
    #[error("invalid semester: {0:?}")]
    InvalidSemester(String),
    #[error("invalid year of study: {0:?}")]
    InvalidYearOfStudy(String),
    #[error("unknown role: {0:?}")]
    UnknownRole(String),
    #[error("invalid {kind} id: {value:?}")]
    InvalidBusinessId { kind: &'static str, value: String },
    #[error("course {0} is not offered")]
    UnknownCourse(CourseCode),
    #[error("please select at least one course to register")]
    EmptySelection,
    #[error(
        "you cannot register more than {ceiling} credit hours per semester \
         ({registered} registered, {requested} requested)"
    )]
    CreditLimitExceeded {
        registered: u16,
        requested: u16,
        ceiling: u16,
    },
    #[error("{0}")]
    InvalidFields(FieldErrors),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_limit_message_names_the_ceiling() {
        let err = DomainError::CreditLimitExceeded {
            registered: 18,
            requested: 10,
            ceiling: 21,
        };

        assert!(err.to_string().starts_with("you cannot register more than 21"));
    }
}
