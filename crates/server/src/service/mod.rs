//! Application services. Each one owns the repositories it needs and
//! turns repository failures into [`ServiceError`]s.

pub mod accounts;
pub mod catalog;
pub mod grading;
pub mod password;
pub mod registration;
pub mod reports;
pub mod teaching;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::error::ServiceError;
use crate::repository::{
    AssignmentRepository, CourseRepository, GradeRepository, RegistrationRepository,
    ReportRepository, SeaOrmAssignmentRepository, SeaOrmCourseRepository, SeaOrmGradeRepository,
    SeaOrmRegistrationRepository, SeaOrmReportRepository, SeaOrmUserRepository, UserRepository,
};

pub use accounts::{AccountService, CreatedAccount, LoginSession};
pub use catalog::{CatalogService, OfferingStatus, Offerings};
pub use grading::{GpaReport, GradeSubmission, GradingService, Transcript};
pub use password::Passwords;
pub use registration::RegistrationService;
pub use reports::{AdminSummaryView, DeanSummaryView, NewReportForm, ReportService};
pub use teaching::TeachingService;

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub grades: Arc<dyn GradeRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl Repositories {
    pub fn sea_orm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            courses: Arc::new(SeaOrmCourseRepository::new(db.clone())),
            registrations: Arc::new(SeaOrmRegistrationRepository::new(db.clone())),
            grades: Arc::new(SeaOrmGradeRepository::new(db.clone())),
            assignments: Arc::new(SeaOrmAssignmentRepository::new(db.clone())),
            reports: Arc::new(SeaOrmReportRepository::new(db)),
        }
    }
}
