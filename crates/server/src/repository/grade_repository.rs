use crate::entity::{student, student_course, student_grade};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use registrar_core::domain::{
    AssessmentKind, AssessmentSheet, CourseCode, CourseId, GradeId, LetterGrade, StudentNumber,
    TeacherNumber, Term,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: StudentNumber,
    pub course_id: CourseId,
    pub course_code: CourseCode,
    pub teacher_id: TeacherNumber,
    pub term: Term,
    pub sheet: AssessmentSheet,
    pub letter: LetterGrade,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeRecord {
    pub id: GradeId,
    pub student_id: String,
    pub course_code: String,
    pub teacher_id: String,
    pub total_marks: f64,
    pub letter_grade: String,
    pub grade_point: f64,
    pub comments: Option<String>,
}

#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// Upserts the grade row and copies letter and marks onto the
    /// registration, both in one transaction.
    async fn submit(&self, grade: NewGrade) -> Result<GradeRecord>;
    async fn average_marks_for_department(&self, department: &str) -> Result<Option<f64>>;
}

#[derive(Clone)]
pub struct SeaOrmGradeRepository {
    db: DatabaseConnection,
}

impl SeaOrmGradeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: student_grade::Model) -> Result<GradeRecord> {
        let id = GradeId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid student_grades.id '{}' from database: {e}", model.id))?;

        Ok(GradeRecord {
            id,
            student_id: model.student_id,
            course_code: model.course_code,
            teacher_id: model.teacher_id,
            total_marks: model.total_marks,
            letter_grade: model.letter_grade,
            grade_point: model.grade_point,
            comments: model.comments,
        })
    }
}

#[async_trait]
impl GradeRepository for SeaOrmGradeRepository {
    async fn submit(&self, grade: NewGrade) -> Result<GradeRecord> {
        let total = grade.sheet.total();
        let letter = grade.letter.as_str().to_string();

        let active_model = student_grade::ActiveModel {
            id: Set(GradeId::new().to_string()),
            student_id: Set(grade.student_id.to_string()),
            course_code: Set(grade.course_code.to_string()),
            teacher_id: Set(grade.teacher_id.to_string()),
            semester: Set(grade.term.semester.number()),
            academic_year: Set(grade.term.academic_year.to_string()),
            final_exam: Set(grade.sheet.get(AssessmentKind::FinalExam)),
            mid_exam: Set(grade.sheet.get(AssessmentKind::MidExam)),
            lab: Set(grade.sheet.get(AssessmentKind::Lab)),
            quiz: Set(grade.sheet.get(AssessmentKind::Quiz)),
            total_marks: Set(total),
            letter_grade: Set(letter.clone()),
            grade_point: Set(grade.letter.grade_point()),
            comments: Set(Some(grade.comments)),
            submitted_at: Set(Utc::now().naive_utc()),
        };

        let txn = self.db.begin().await?;

        student_grade::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    student_grade::Column::StudentId,
                    student_grade::Column::CourseCode,
                    student_grade::Column::TeacherId,
                    student_grade::Column::Semester,
                    student_grade::Column::AcademicYear,
                ])
                .update_columns([
                    student_grade::Column::FinalExam,
                    student_grade::Column::MidExam,
                    student_grade::Column::Lab,
                    student_grade::Column::Quiz,
                    student_grade::Column::TotalMarks,
                    student_grade::Column::LetterGrade,
                    student_grade::Column::GradePoint,
                    student_grade::Column::Comments,
                    student_grade::Column::SubmittedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        let updated = student_course::Entity::update_many()
            .col_expr(student_course::Column::Grade, Expr::value(letter))
            .col_expr(student_course::Column::Marks, Expr::value(total))
            .filter(student_course::Column::StudentId.eq(grade.student_id.as_str()))
            .filter(student_course::Column::CourseId.eq(grade.course_id.to_string()))
            .filter(student_course::Column::Semester.eq(grade.term.semester.number()))
            .filter(student_course::Column::AcademicYear.eq(grade.term.academic_year.as_str()))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(anyhow!(
                "no registration of {} for {} in {} to grade",
                grade.student_id,
                grade.course_code,
                grade.term
            ));
        }

        let model = student_grade::Entity::find()
            .filter(student_grade::Column::StudentId.eq(grade.student_id.as_str()))
            .filter(student_grade::Column::CourseCode.eq(grade.course_code.as_str()))
            .filter(student_grade::Column::TeacherId.eq(grade.teacher_id.as_str()))
            .filter(student_grade::Column::Semester.eq(grade.term.semester.number()))
            .filter(student_grade::Column::AcademicYear.eq(grade.term.academic_year.as_str()))
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow!("grade row missing right after upsert"))?;

        txn.commit().await?;
        Self::map_model(model)
    }

    async fn average_marks_for_department(&self, department: &str) -> Result<Option<f64>> {
        let student_ids: Vec<String> = student::Entity::find()
            .select_only()
            .column(student::Column::StudentId)
            .filter(student::Column::Department.eq(department))
            .into_tuple()
            .all(&self.db)
            .await?;
        if student_ids.is_empty() {
            return Ok(None);
        }

        let totals: Vec<f64> = student_grade::Entity::find()
            .select_only()
            .column(student_grade::Column::TotalMarks)
            .filter(student_grade::Column::StudentId.is_in(student_ids))
            .into_tuple()
            .all(&self.db)
            .await?;

        if totals.is_empty() {
            return Ok(None);
        }
        Ok(Some(totals.iter().sum::<f64>() / totals.len() as f64))
    }
}
