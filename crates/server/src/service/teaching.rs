use std::sync::Arc;

use registrar_core::domain::{CourseCode, DomainError, TeacherNumber, Term, catalog};
use tracing::{debug, info};

use super::ServiceResult;
use crate::error::ServiceError;
use crate::repository::{
    AssignmentRecord, AssignmentRepository, CourseRecord, CourseRepository, RegistrationRepository,
    RosterRecord, UserRepository,
};

#[derive(Clone)]
pub struct TeachingService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    assignments: Arc<dyn AssignmentRepository>,
}

impl TeachingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            users,
            courses,
            registrations,
            assignments,
        }
    }

    /// Returns `false` when the teacher already had the course that term.
    pub async fn assign_course(
        &self,
        teacher_id: &TeacherNumber,
        course_code: &CourseCode,
        term: &Term,
    ) -> ServiceResult<bool> {
        self.ensure_teacher(teacher_id).await?;
        let course = self.catalogued_course(course_code).await?;

        let assigned = self
            .assignments
            .assign(teacher_id, &course.offering.code, term)
            .await?;

        info!(
            teacher_id = %teacher_id,
            course_code = %course_code,
            term = %term,
            assigned,
            "course assignment"
        );
        Ok(assigned)
    }

    pub async fn assignments(&self, teacher_id: &TeacherNumber) -> ServiceResult<Vec<AssignmentRecord>> {
        self.ensure_teacher(teacher_id).await?;
        Ok(self.assignments.list_for_teacher(teacher_id).await?)
    }

    pub async fn roster(
        &self,
        teacher_id: &TeacherNumber,
        course_code: &CourseCode,
        term: &Term,
    ) -> ServiceResult<Vec<RosterRecord>> {
        self.ensure_teacher(teacher_id).await?;
        let course = self
            .courses
            .find_by_code(course_code)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", course_code))?;

        Ok(self.registrations.roster(course.id, term).await?)
    }

    async fn ensure_teacher(&self, teacher_id: &TeacherNumber) -> ServiceResult<()> {
        self.users
            .find_teacher(teacher_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("teacher", teacher_id))?;
        Ok(())
    }

    /// The catalog row for `code`, seeding it from the curriculum when needed.
    async fn catalogued_course(&self, code: &CourseCode) -> ServiceResult<CourseRecord> {
        if let Some(course) = self.courses.find_by_code(code).await? {
            return Ok(course);
        }

        let offering = catalog::find(code).ok_or_else(|| DomainError::UnknownCourse(code.clone()))?;
        debug!(course_code = %code, "seeding course before assignment");
        Ok(self.courses.upsert(&offering).await?)
    }
}
