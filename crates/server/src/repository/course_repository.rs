use crate::entity::course;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use registrar_core::domain::{
    CourseCode, CourseId, CourseOffering, CreditHours, Semester, YearOfStudy,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait, sea_query::OnConflict,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub id: CourseId,
    pub offering: CourseOffering,
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn upsert(&self, offering: &CourseOffering) -> Result<CourseRecord>;
    /// Upserts every offering in one transaction and returns how many were written.
    async fn upsert_all(&self, offerings: &[CourseOffering]) -> Result<u64>;
    async fn find_by_code(&self, code: &CourseCode) -> Result<Option<CourseRecord>>;
    async fn find_by_codes(&self, codes: &[CourseCode]) -> Result<Vec<CourseRecord>>;
    async fn count(&self) -> Result<u64>;
}

#[derive(Clone)]
pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn small(value: u16, column: &str) -> Result<i16> {
    i16::try_from(value).map_err(|_| anyhow!("courses.{column} out of range: {value}"))
}

fn unsigned(value: i16, column: &str) -> Result<u16> {
    u16::try_from(value)
        .map_err(|_| anyhow!("invalid courses.{column} from database: {value} (must be non-negative)"))
}

pub(crate) fn map_model(model: course::Model) -> Result<CourseRecord> {
    let id = CourseId::from_str(&model.id)
        .map_err(|e| anyhow!("invalid courses.id '{}' from database: {e}", model.id))?;
    let year_of_study = u8::try_from(model.year_of_study).map_err(|_| {
        anyhow!(
            "invalid courses.year_of_study from database: {}",
            model.year_of_study
        )
    })?;

    Ok(CourseRecord {
        id,
        offering: CourseOffering {
            code: CourseCode::new(model.course_code)?,
            name: model.course_name,
            ects: unsigned(model.ects, "ects")?,
            credit_hours: CreditHours::new(i64::from(model.credit_hours))?,
            lecture_hours: unsigned(model.lecture_hours, "lecture_hours")?,
            lab_hours: unsigned(model.lab_hours, "lab_hours")?,
            tutorial_hours: unsigned(model.tutorial_hours, "tutorial_hours")?,
            department: model.department,
            year_of_study: YearOfStudy::new(year_of_study)?,
            semester: Semester::from_number(model.semester)?,
            prerequisite: model
                .prerequisite
                .as_deref()
                .map(CourseCode::optional)
                .transpose()?
                .flatten(),
        },
    })
}

/// Inserts the offering, or refreshes the listing fields of the row that
/// already holds its code. Usable inside a transaction.
pub(crate) async fn upsert_offering<C: ConnectionTrait>(
    conn: &C,
    offering: &CourseOffering,
) -> Result<CourseRecord> {
    let active_model = course::ActiveModel {
        id: Set(CourseId::new().to_string()),
        course_code: Set(offering.code.to_string()),
        course_name: Set(offering.name.clone()),
        ects: Set(small(offering.ects, "ects")?),
        credit_hours: Set(small(offering.credit_hours.value(), "credit_hours")?),
        lecture_hours: Set(small(offering.lecture_hours, "lecture_hours")?),
        lab_hours: Set(small(offering.lab_hours, "lab_hours")?),
        tutorial_hours: Set(small(offering.tutorial_hours, "tutorial_hours")?),
        department: Set(offering.department.clone()),
        year_of_study: Set(i16::from(offering.year_of_study.value())),
        semester: Set(offering.semester.number()),
        prerequisite: Set(offering.prerequisite.as_ref().map(ToString::to_string)),
        ..Default::default()
    };

    course::Entity::insert(active_model)
        .on_conflict(
            OnConflict::column(course::Column::CourseCode)
                .update_columns([
                    course::Column::CourseName,
                    course::Column::Ects,
                    course::Column::CreditHours,
                    course::Column::LectureHours,
                    course::Column::LabHours,
                    course::Column::TutorialHours,
                    course::Column::Department,
                    course::Column::YearOfStudy,
                    course::Column::Semester,
                    course::Column::Prerequisite,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_code_in(conn, &offering.code)
        .await?
        .ok_or_else(|| anyhow!("course {} missing right after upsert", offering.code))
}

pub(crate) async fn find_by_code_in<C: ConnectionTrait>(
    conn: &C,
    code: &CourseCode,
) -> Result<Option<CourseRecord>> {
    let model = course::Entity::find()
        .filter(course::Column::CourseCode.eq(code.as_str()))
        .one(conn)
        .await?;

    model.map(map_model).transpose()
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn upsert(&self, offering: &CourseOffering) -> Result<CourseRecord> {
        upsert_offering(&self.db, offering).await
    }

    async fn upsert_all(&self, offerings: &[CourseOffering]) -> Result<u64> {
        let txn = self.db.begin().await?;
        for offering in offerings {
            upsert_offering(&txn, offering).await?;
        }
        txn.commit().await?;

        Ok(offerings.len() as u64)
    }

    async fn find_by_code(&self, code: &CourseCode) -> Result<Option<CourseRecord>> {
        find_by_code_in(&self.db, code).await
    }

    async fn find_by_codes(&self, codes: &[CourseCode]) -> Result<Vec<CourseRecord>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let models = course::Entity::find()
            .filter(course::Column::CourseCode.is_in(codes.iter().map(|c| c.to_string())))
            .all(&self.db)
            .await?;

        models.into_iter().map(map_model).collect()
    }

    async fn count(&self) -> Result<u64> {
        Ok(course::Entity::find().count(&self.db).await?)
    }
}
