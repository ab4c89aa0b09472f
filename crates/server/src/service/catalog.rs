use std::collections::HashSet;
use std::sync::Arc;

use registrar_core::domain::{
    CourseCode, CourseOffering, CreditHours, CreditLoadGuard, StudentNumber, Term, YearOfStudy,
    catalog,
};
use tracing::info;

use super::ServiceResult;
use crate::error::ServiceError;
use crate::repository::{CourseRepository, RegistrationRepository, StudentRecord, UserRepository};

#[derive(Debug, Clone)]
pub struct OfferingStatus {
    pub offering: CourseOffering,
    pub registered: bool,
}

/// What a student sees when picking courses for a term.
#[derive(Debug, Clone)]
pub struct Offerings {
    pub student: StudentRecord,
    pub term: Term,
    pub year_of_study: YearOfStudy,
    pub courses: Vec<OfferingStatus>,
    pub registered_credits: u16,
    pub ceiling: u16,
}

#[derive(Clone)]
pub struct CatalogService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    guard: CreditLoadGuard,
}

impl CatalogService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        guard: CreditLoadGuard,
    ) -> Self {
        Self {
            users,
            courses,
            registrations,
            guard,
        }
    }

    /// Upserts the built-in curriculum. Safe to run on every start.
    pub async fn seed(&self) -> ServiceResult<u64> {
        let written = self.courses.upsert_all(&catalog::curriculum()).await?;
        info!(courses = written, "course catalog seeded");
        Ok(written)
    }

    pub async fn offerings(
        &self,
        student_id: &StudentNumber,
        term: Term,
        year_of_study: YearOfStudy,
    ) -> ServiceResult<Offerings> {
        let student = self
            .users
            .find_student(student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student", student_id))?;

        let registered = self.registrations.list_for_term(student_id, &term).await?;
        let registered_codes: HashSet<&CourseCode> = registered
            .iter()
            .map(|registration| &registration.course.offering.code)
            .collect();
        let registered_credits: CreditHours = registered
            .iter()
            .map(|registration| registration.course.offering.credit_hours)
            .sum();

        let courses = catalog::offerings_for(&student.department, year_of_study, term.semester)
            .into_iter()
            .map(|offering| OfferingStatus {
                registered: registered_codes.contains(&offering.code),
                offering,
            })
            .collect();

        Ok(Offerings {
            student,
            term,
            year_of_study,
            courses,
            registered_credits: registered_credits.value(),
            ceiling: self.guard.ceiling(),
        })
    }
}
