mod account;
mod assessment;
pub mod catalog;
mod course;
mod credit;
mod error;
mod gpa;
mod grade;
mod ids;
mod registration;
mod report;
mod selection;
mod term;

pub use account::{
    AccountForm, DeanType, Email, FieldError, FieldErrors, Gender, NewAccount, Profile,
    ProfileForm, Role, Username,
};
pub use assessment::{AssessmentKind, AssessmentSheet};
pub use course::{CourseCode, CourseOffering, CreditHours};
pub use credit::CreditLoadGuard;
pub use error::DomainError;
pub use gpa::{Gpa, GpaPolicy, GradedCourse, display_gpa};
pub use grade::{LetterGrade, display_grade_point, grade_point_for};
pub use ids::{
    AssignmentId, CourseId, DeanNumber, GradeId, RegistrationId, ReportId, StudentNumber,
    TeacherNumber, UserId,
};
pub use registration::{RegistrationBatch, RegistrationOutcome, RegistrationPhase, ResolvedCourse};
pub use report::ReportStatus;
pub use selection::CourseSelection;
pub use term::{AcademicYear, Semester, Term, YearOfStudy};
