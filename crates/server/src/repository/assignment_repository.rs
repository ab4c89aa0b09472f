use crate::entity::teacher_course;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use registrar_core::domain::{
    AcademicYear, AssignmentId, CourseCode, Semester, TeacherNumber, Term,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::OnConflict,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub id: AssignmentId,
    pub teacher_id: TeacherNumber,
    pub course_code: CourseCode,
    pub term: Term,
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Returns `false` when the teacher already held the course that term.
    async fn assign(
        &self,
        teacher_id: &TeacherNumber,
        course_code: &CourseCode,
        term: &Term,
    ) -> Result<bool>;
    async fn list_for_teacher(&self, teacher_id: &TeacherNumber) -> Result<Vec<AssignmentRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmAssignmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: teacher_course::Model) -> Result<AssignmentRecord> {
        let id = AssignmentId::from_str(&model.id).map_err(|e| {
            anyhow!("invalid teacher_courses.id '{}' from database: {e}", model.id)
        })?;

        Ok(AssignmentRecord {
            id,
            teacher_id: TeacherNumber::parse(model.teacher_id)?,
            course_code: CourseCode::new(model.course_code)?,
            term: Term::new(
                AcademicYear::new(model.academic_year)?,
                Semester::from_number(model.semester)?,
            ),
        })
    }
}

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn assign(
        &self,
        teacher_id: &TeacherNumber,
        course_code: &CourseCode,
        term: &Term,
    ) -> Result<bool> {
        let active_model = teacher_course::ActiveModel {
            id: Set(AssignmentId::new().to_string()),
            teacher_id: Set(teacher_id.to_string()),
            course_code: Set(course_code.to_string()),
            semester: Set(term.semester.number()),
            academic_year: Set(term.academic_year.to_string()),
            ..Default::default()
        };

        let rows = teacher_course::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    teacher_course::Column::TeacherId,
                    teacher_course::Column::CourseCode,
                    teacher_course::Column::Semester,
                    teacher_course::Column::AcademicYear,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(rows > 0)
    }

    async fn list_for_teacher(&self, teacher_id: &TeacherNumber) -> Result<Vec<AssignmentRecord>> {
        let models = teacher_course::Entity::find()
            .filter(teacher_course::Column::TeacherId.eq(teacher_id.as_str()))
            .order_by_asc(teacher_course::Column::AcademicYear)
            .order_by_asc(teacher_course::Column::Semester)
            .order_by_asc(teacher_course::Column::CourseCode)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
