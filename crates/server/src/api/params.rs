//! Path and query parameters shared by the handlers.

use registrar_core::domain::{
    AcademicYear, DeanNumber, Semester, StudentNumber, TeacherNumber, Term,
};

use super::error::ApiError;
use crate::error::ServiceError;

pub fn term(academic_year: &str, semester: i16) -> Result<Term, ApiError> {
    Ok(Term::new(
        AcademicYear::new(academic_year)?,
        Semester::from_number(semester)?,
    ))
}

// A malformed id in the path can never name a stored record.

pub fn student_id(raw: &str) -> Result<StudentNumber, ApiError> {
    StudentNumber::parse(raw).map_err(|_| ServiceError::not_found("student", raw).into())
}

pub fn teacher_id(raw: &str) -> Result<TeacherNumber, ApiError> {
    TeacherNumber::parse(raw).map_err(|_| ServiceError::not_found("teacher", raw).into())
}

pub fn dean_id(raw: &str) -> Result<DeanNumber, ApiError> {
    DeanNumber::parse(raw).map_err(|_| ServiceError::not_found("dean", raw).into())
}
