use std::sync::Arc;

use registrar_core::domain::{DeanNumber, DomainError, FieldErrors, TeacherNumber};
use tracing::info;

use super::ServiceResult;
use crate::error::ServiceError;
use crate::repository::{
    CourseRepository, DeanRecord, GradeRepository, NewReport, Population, ReportRecord,
    ReportRepository, UserRepository,
};

#[derive(Debug, Clone)]
pub struct NewReportForm {
    pub report_type: String,
    pub title: String,
    pub description: String,
}

impl NewReportForm {
    fn validate(self, teacher_id: TeacherNumber) -> Result<NewReport, DomainError> {
        let mut errors = FieldErrors::new();
        let report_type = self.report_type.trim().to_string();
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();

        if report_type.is_empty() {
            errors.push("report_type", "Report type is required");
        }
        if title.is_empty() {
            errors.push("title", "Title is required");
        }
        if description.is_empty() {
            errors.push("description", "Description is required");
        }
        errors.into_result()?;

        Ok(NewReport {
            teacher_id,
            report_type,
            title,
            description,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSummaryView {
    pub population: Population,
    pub courses: u64,
}

#[derive(Debug, Clone)]
pub struct DeanSummaryView {
    pub dean: DeanRecord,
    pub students: u64,
    pub teachers: u64,
    pub average_marks: Option<f64>,
}

#[derive(Clone)]
pub struct ReportService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    grades: Arc<dyn GradeRepository>,
    reports: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        grades: Arc<dyn GradeRepository>,
        reports: Arc<dyn ReportRepository>,
    ) -> Self {
        Self {
            users,
            courses,
            grades,
            reports,
        }
    }

    /// Files a teacher report. New reports start out pending.
    pub async fn submit_report(
        &self,
        teacher_id: &TeacherNumber,
        form: NewReportForm,
    ) -> ServiceResult<ReportRecord> {
        self.users
            .find_teacher(teacher_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("teacher", teacher_id))?;

        let report = self.reports.create(form.validate(teacher_id.clone())?).await?;
        info!(teacher_id = %teacher_id, report_id = %report.id, "report submitted");
        Ok(report)
    }

    pub async fn reports_for(&self, teacher_id: &TeacherNumber) -> ServiceResult<Vec<ReportRecord>> {
        self.users
            .find_teacher(teacher_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("teacher", teacher_id))?;

        Ok(self.reports.list_by_teacher(teacher_id).await?)
    }

    pub async fn admin_summary(&self) -> ServiceResult<AdminSummaryView> {
        Ok(AdminSummaryView {
            population: self.users.population().await?,
            courses: self.courses.count().await?,
        })
    }

    pub async fn dean_summary(&self, dean_id: &DeanNumber) -> ServiceResult<DeanSummaryView> {
        let dean = self
            .users
            .find_dean(dean_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("dean", dean_id))?;

        let (students, teachers) = self.users.department_population(&dean.department).await?;
        let average_marks = self
            .grades
            .average_marks_for_department(&dean.department)
            .await?;

        Ok(DeanSummaryView {
            dean,
            students,
            teachers,
            average_marks,
        })
    }
}
