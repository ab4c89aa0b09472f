use std::sync::Arc;

use registrar_core::domain::{
    AssessmentSheet, CourseCode, DomainError, FieldErrors, Gpa, GpaPolicy, GradedCourse,
    LetterGrade, StudentNumber, TeacherNumber, Term,
};
use tracing::{info, warn};

use super::ServiceResult;
use crate::error::ServiceError;
use crate::repository::{
    CourseRepository, GradeRecord, GradeRepository, NewGrade, RegisteredCourse,
    RegistrationRepository, UserRepository,
};

#[derive(Debug, Clone)]
pub struct GradeSubmission {
    pub student_id: StudentNumber,
    pub course_code: CourseCode,
    pub term: Term,
    pub sheet: AssessmentSheet,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub student_id: StudentNumber,
    pub courses: Vec<RegisteredCourse>,
    pub gpa: Option<Gpa>,
}

#[derive(Debug, Clone)]
pub struct GpaReport {
    pub student_id: StudentNumber,
    pub gpa: Option<Gpa>,
    pub graded_courses: usize,
    pub policy: GpaPolicy,
}

#[derive(Clone)]
pub struct GradingService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    grades: Arc<dyn GradeRepository>,
    policy: GpaPolicy,
}

impl GradingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        grades: Arc<dyn GradeRepository>,
        policy: GpaPolicy,
    ) -> Self {
        Self {
            users,
            courses,
            registrations,
            grades,
            policy,
        }
    }

    /// Grades one registration. The letter is always derived from the total
    /// and written back onto the registration.
    pub async fn submit_grade(
        &self,
        teacher_id: &TeacherNumber,
        submission: GradeSubmission,
    ) -> ServiceResult<GradeRecord> {
        if submission.sheet.is_empty() {
            return Err(DomainError::InvalidFields(FieldErrors::single(
                "assessments",
                "Enter at least one assessment score",
            ))
            .into());
        }

        self.users
            .find_teacher(teacher_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("teacher", teacher_id))?;
        self.users
            .find_student(&submission.student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student", &submission.student_id))?;
        let course = self
            .courses
            .find_by_code(&submission.course_code)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", &submission.course_code))?;

        let registration = self
            .registrations
            .find(&submission.student_id, course.id, &submission.term)
            .await?;
        if registration.is_none() {
            return Err(ServiceError::NotRegistered {
                student_id: submission.student_id.to_string(),
                course_code: submission.course_code.to_string(),
                term: submission.term,
            });
        }

        let letter = LetterGrade::from_total(submission.sheet.total());
        let comments = submission.sheet.comments();
        let record = self
            .grades
            .submit(NewGrade {
                student_id: submission.student_id,
                course_id: course.id,
                course_code: submission.course_code,
                teacher_id: teacher_id.clone(),
                term: submission.term,
                sheet: submission.sheet,
                letter,
                comments,
            })
            .await?;

        info!(
            teacher_id = %teacher_id,
            student_id = %record.student_id,
            course_code = %record.course_code,
            total_marks = record.total_marks,
            letter_grade = %record.letter_grade,
            "grade submitted"
        );
        Ok(record)
    }

    pub async fn transcript(&self, student_id: &StudentNumber) -> ServiceResult<Transcript> {
        let courses = self.registered_courses(student_id).await?;
        let gpa = Gpa::compute(self.policy, graded(&courses));

        Ok(Transcript {
            student_id: student_id.clone(),
            courses,
            gpa,
        })
    }

    pub async fn compute_gpa(&self, student_id: &StudentNumber) -> ServiceResult<GpaReport> {
        let courses = self.registered_courses(student_id).await?;
        let graded: Vec<GradedCourse> = graded(&courses).collect();

        Ok(GpaReport {
            student_id: student_id.clone(),
            graded_courses: graded.len(),
            gpa: Gpa::compute(self.policy, graded),
            policy: self.policy,
        })
    }

    async fn registered_courses(
        &self,
        student_id: &StudentNumber,
    ) -> ServiceResult<Vec<RegisteredCourse>> {
        self.users
            .find_student(student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student", student_id))?;

        Ok(self.registrations.list_for_student(student_id).await?)
    }
}

/// Registrations with a stored letter. A letter that does not parse counts
/// as 0.0, the same as an F.
fn graded(courses: &[RegisteredCourse]) -> impl Iterator<Item = GradedCourse> + '_ {
    courses.iter().filter_map(|registration| {
        let stored = registration.grade.as_deref()?;
        let letter = stored.parse::<LetterGrade>().unwrap_or_else(|_| {
            warn!(
                course_code = %registration.course.offering.code,
                grade = stored,
                "unrecognized stored letter counts as 0.0"
            );
            LetterGrade::F
        });
        Some(GradedCourse {
            letter,
            credit_hours: registration.course.offering.credit_hours,
        })
    })
}
