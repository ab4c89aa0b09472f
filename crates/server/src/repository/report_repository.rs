use crate::entity::report;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use registrar_core::domain::{ReportId, ReportStatus, TeacherNumber};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub id: ReportId,
    pub teacher_id: TeacherNumber,
    pub report_type: String,
    pub title: String,
    pub description: String,
    pub status: ReportStatus,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub teacher_id: TeacherNumber,
    pub report_type: String,
    pub title: String,
    pub description: String,
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, new_report: NewReport) -> Result<ReportRecord>;
    async fn list_by_teacher(&self, teacher_id: &TeacherNumber) -> Result<Vec<ReportRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_status(code: i16) -> Result<ReportStatus> {
        match code {
            0 => Ok(ReportStatus::Pending),
            1 => Ok(ReportStatus::Reviewed),
            _ => Err(anyhow!("invalid reports.status code from database: {code}")),
        }
    }

    fn map_status_code(status: ReportStatus) -> i16 {
        match status {
            ReportStatus::Pending => 0,
            ReportStatus::Reviewed => 1,
        }
    }

    fn map_model(model: report::Model) -> Result<ReportRecord> {
        let id = ReportId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid reports.id '{}' from database: {e}", model.id))?;

        Ok(ReportRecord {
            id,
            teacher_id: TeacherNumber::parse(model.teacher_id)?,
            report_type: model.report_type,
            title: model.title,
            description: model.description,
            status: Self::map_status(model.status)?,
            submitted_at: model.submitted_at,
        })
    }
}

#[async_trait]
impl ReportRepository for SeaOrmReportRepository {
    async fn create(&self, new_report: NewReport) -> Result<ReportRecord> {
        let id = ReportId::new();

        let active_model = report::ActiveModel {
            id: Set(id.to_string()),
            teacher_id: Set(new_report.teacher_id.to_string()),
            report_type: Set(new_report.report_type),
            title: Set(new_report.title),
            description: Set(new_report.description),
            status: Set(Self::map_status_code(ReportStatus::Pending)),
            submitted_at: Set(Utc::now().naive_utc()),
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn list_by_teacher(&self, teacher_id: &TeacherNumber) -> Result<Vec<ReportRecord>> {
        let models = report::Entity::find()
            .filter(report::Column::TeacherId.eq(teacher_id.as_str()))
            .order_by_desc(report::Column::SubmittedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
