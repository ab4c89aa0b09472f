//! Shared application state.

use sea_orm::DatabaseConnection;

use crate::config::RegistrarConfig;
use crate::service::{
    AccountService, CatalogService, GradingService, Passwords, RegistrationService, ReportService,
    Repositories, TeachingService,
};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub catalog: CatalogService,
    pub registration: RegistrationService,
    pub grading: GradingService,
    pub teaching: TeachingService,
    pub reports: ReportService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &RegistrarConfig) -> anyhow::Result<Self> {
        let repos = Repositories::sea_orm(db);
        let passwords = Passwords::new(&config.security)?;
        let guard = config.registration.credit_guard();

        Ok(Self {
            accounts: AccountService::new(repos.users.clone(), passwords),
            catalog: CatalogService::new(
                repos.users.clone(),
                repos.courses.clone(),
                repos.registrations.clone(),
                guard,
            ),
            registration: RegistrationService::new(
                repos.users.clone(),
                repos.courses.clone(),
                repos.registrations.clone(),
                guard,
            ),
            grading: GradingService::new(
                repos.users.clone(),
                repos.courses.clone(),
                repos.registrations.clone(),
                repos.grades.clone(),
                config.registration.gpa_policy.into(),
            ),
            teaching: TeachingService::new(
                repos.users.clone(),
                repos.courses.clone(),
                repos.registrations.clone(),
                repos.assignments,
            ),
            reports: ReportService::new(repos.users, repos.courses, repos.grades, repos.reports),
        })
    }
}
