use std::collections::HashSet;
use std::sync::Arc;

use registrar_core::domain::{
    CourseCode, CourseSelection, CreditHours, CreditLoadGuard, DomainError, RegistrationBatch,
    RegistrationOutcome, ResolvedCourse, StudentNumber, Term, catalog,
};
use tracing::{error, info, warn};

use super::ServiceResult;
use crate::error::ServiceError;
use crate::repository::{CourseRepository, RegistrationRepository, UserRepository};

#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    guard: CreditLoadGuard,
}

impl RegistrationService {
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

    /// Registers the selected courses for `term` as one all-or-nothing batch.
    ///
    /// Courses already held in the term are reported back, not re-inserted.
    /// Codes missing from the catalog table but present in the curriculum
    /// are seeded inside the same transaction. The selection is drained.
    pub async fn register_courses(
        &self,
        student_id: &StudentNumber,
        term: Term,
        selection: &mut CourseSelection,
    ) -> ServiceResult<RegistrationOutcome> {
        let student = self
            .users
            .find_student(student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student", student_id))?;

        let existing = self.registrations.list_for_term(student_id, &term).await?;
        let registered: HashSet<CourseCode> = existing
            .iter()
            .map(|registration| registration.course.offering.code.clone())
            .collect();
        let registered_credits: CreditHours = existing
            .iter()
            .map(|registration| registration.course.offering.credit_hours)
            .sum();

        let selected: Vec<CourseCode> = selection.iter().cloned().collect();
        let catalogued = self.courses.find_by_codes(&selected).await?;

        let planned = RegistrationBatch::plan(
            term,
            selection,
            &registered,
            registered_credits,
            self.guard,
            |code| {
                catalogued
                    .iter()
                    .find(|record| &record.offering.code == code)
                    .map(|record| ResolvedCourse {
                        offering: record.offering.clone(),
                        course_id: Some(record.id),
                    })
                    .or_else(|| {
                        catalog::find(code).map(|offering| ResolvedCourse {
                            offering,
                            course_id: None,
                        })
                    })
            },
        );
        let batch = match planned {
            Ok(batch) => batch,
            Err(err) => {
                if let DomainError::CreditLimitExceeded {
                    registered,
                    requested,
                    ceiling,
                } = &err
                {
                    warn!(
                        student_id = %student_id,
                        registered,
                        requested,
                        ceiling,
                        "registration rejected by credit ceiling"
                    );
                }
                return Err(err.into());
            }
        };

        let outcome = self
            .registrations
            .apply_batch(student_id, batch)
            .await
            .map_err(|err| {
                let err = ServiceError::from(err);
                match &err {
                    ServiceError::Domain(domain) => warn!(
                        student_id = %student_id,
                        error = %domain,
                        "registration batch rejected before commit"
                    ),
                    _ => error!(
                        student_id = %student_id,
                        error = ?err,
                        "registration batch rolled back"
                    ),
                }
                err
            })?;

        info!(
            student_id = %student_id,
            department = %student.department,
            term = %outcome.term,
            inserted = outcome.inserted,
            already_registered = outcome.already_registered.len(),
            seeded = outcome.seeded.len(),
            total_credits = outcome.total_credits,
            "courses registered"
        );
        Ok(outcome)
    }
}
