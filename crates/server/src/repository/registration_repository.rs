use crate::entity::{course, student, student_course, user};
use crate::repository::course_repository::{self, CourseRecord};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use registrar_core::domain::{
    AcademicYear, CourseCode, CourseId, CreditHours, RegistrationBatch, RegistrationId,
    RegistrationOutcome, Semester, StudentNumber, Term,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, sea_query::OnConflict,
};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RegisteredCourse {
    pub id: RegistrationId,
    pub course: CourseRecord,
    pub term: Term,
    pub grade: Option<String>,
    pub marks: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RosterRecord {
    pub student_id: StudentNumber,
    pub full_name: String,
    pub department: String,
    pub grade: Option<String>,
    pub marks: Option<f64>,
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn list_for_student(&self, student_id: &StudentNumber) -> Result<Vec<RegisteredCourse>>;
    async fn list_for_term(
        &self,
        student_id: &StudentNumber,
        term: &Term,
    ) -> Result<Vec<RegisteredCourse>>;
    async fn find(
        &self,
        student_id: &StudentNumber,
        course_id: CourseId,
        term: &Term,
    ) -> Result<Option<RegisteredCourse>>;
    async fn roster(&self, course_id: CourseId, term: &Term) -> Result<Vec<RosterRecord>>;
    /// Seeds and inserts every pending course of the batch in one
    /// transaction. Nothing is kept when any statement fails or when the
    /// term load read back before commit is over the ceiling.
    async fn apply_batch(
        &self,
        student_id: &StudentNumber,
        batch: RegistrationBatch,
    ) -> Result<RegistrationOutcome>;
}

#[derive(Clone)]
pub struct SeaOrmRegistrationRepository {
    db: DatabaseConnection,
}

impl SeaOrmRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_term(semester: i16, academic_year: String) -> Result<Term> {
        Ok(Term::new(
            AcademicYear::new(academic_year)?,
            Semester::from_number(semester)?,
        ))
    }

    fn map_model(
        model: student_course::Model,
        course: Option<course::Model>,
    ) -> Result<RegisteredCourse> {
        let id = RegistrationId::from_str(&model.id).map_err(|e| {
            anyhow!(
                "invalid student_course_registrations.id '{}' from database: {e}",
                model.id
            )
        })?;
        let course = course.ok_or_else(|| {
            anyhow!(
                "registration {} references missing course {}",
                model.id,
                model.course_id
            )
        })?;

        Ok(RegisteredCourse {
            id,
            course: course_repository::map_model(course)?,
            term: Self::map_term(model.semester, model.academic_year)?,
            grade: model.grade,
            marks: model.marks,
        })
    }

    /// Returns `false` when the registration already existed.
    async fn insert_if_absent<C: ConnectionTrait>(
        conn: &C,
        student_id: &StudentNumber,
        course_id: CourseId,
        term: &Term,
    ) -> Result<bool> {
        let active_model = student_course::ActiveModel {
            id: Set(RegistrationId::new().to_string()),
            student_id: Set(student_id.to_string()),
            course_id: Set(course_id.to_string()),
            semester: Set(term.semester.number()),
            academic_year: Set(term.academic_year.to_string()),
            grade: Set(None),
            marks: Set(None),
            ..Default::default()
        };

        let rows = student_course::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    student_course::Column::StudentId,
                    student_course::Column::CourseId,
                    student_course::Column::Semester,
                    student_course::Column::AcademicYear,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        Ok(rows > 0)
    }

    async fn write_batch(
        txn: &DatabaseTransaction,
        student_id: &StudentNumber,
        batch: &mut RegistrationBatch,
    ) -> Result<()> {
        let pending = batch.pending().to_vec();
        if pending.is_empty() {
            return Ok(());
        }

        // Serializes batches of the same student on backends with row locks.
        student::Entity::find()
            .filter(student::Column::StudentId.eq(student_id.as_str()))
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| anyhow!("student {student_id} missing while registering"))?;

        let mut course_ids: Vec<(CourseCode, CourseId, CreditHours)> =
            Vec::with_capacity(pending.len());
        if pending.iter().any(|course| !course.is_catalogued()) {
            batch.begin_seeding();
        }
        for course in &pending {
            let course_id = match course.course_id {
                Some(course_id) => course_id,
                None => {
                    let record = course_repository::upsert_offering(txn, &course.offering).await?;
                    debug!(course_code = %course.offering.code, "seeded course from curriculum");
                    batch.record_seeded(course.offering.code.clone());
                    record.id
                }
            };
            course_ids.push((
                course.offering.code.clone(),
                course_id,
                course.offering.credit_hours,
            ));
        }

        batch.begin_inserting();
        for (code, course_id, credit_hours) in course_ids {
            if Self::insert_if_absent(txn, student_id, course_id, batch.term()).await? {
                batch.record_inserted(credit_hours);
            } else {
                batch.record_duplicate(code, credit_hours);
            }
        }

        let term_credits = Self::term_credits(txn, student_id, batch.term()).await?;
        batch.confirm_term_credits(term_credits)?;

        Ok(())
    }

    async fn term_credits<C: ConnectionTrait>(
        conn: &C,
        student_id: &StudentNumber,
        term: &Term,
    ) -> Result<u16> {
        let hours: Vec<i16> = student_course::Entity::find()
            .select_only()
            .column(course::Column::CreditHours)
            .inner_join(course::Entity)
            .filter(student_course::Column::StudentId.eq(student_id.as_str()))
            .filter(student_course::Column::Semester.eq(term.semester.number()))
            .filter(student_course::Column::AcademicYear.eq(term.academic_year.as_str()))
            .into_tuple()
            .all(conn)
            .await?;

        hours.into_iter().try_fold(0u16, |total, value| -> Result<u16> {
            let value = u16::try_from(value)
                .map_err(|_| anyhow!("invalid courses.credit_hours from database: {value}"))?;
            Ok(total.saturating_add(value))
        })
    }
}

#[async_trait]
impl RegistrationRepository for SeaOrmRegistrationRepository {
    async fn list_for_student(&self, student_id: &StudentNumber) -> Result<Vec<RegisteredCourse>> {
        let rows = student_course::Entity::find()
            .filter(student_course::Column::StudentId.eq(student_id.as_str()))
            .order_by_asc(student_course::Column::AcademicYear)
            .order_by_asc(student_course::Column::Semester)
            .find_also_related(course::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(model, course)| Self::map_model(model, course))
            .collect()
    }

    async fn list_for_term(
        &self,
        student_id: &StudentNumber,
        term: &Term,
    ) -> Result<Vec<RegisteredCourse>> {
        let rows = student_course::Entity::find()
            .filter(student_course::Column::StudentId.eq(student_id.as_str()))
            .filter(student_course::Column::Semester.eq(term.semester.number()))
            .filter(student_course::Column::AcademicYear.eq(term.academic_year.as_str()))
            .find_also_related(course::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(model, course)| Self::map_model(model, course))
            .collect()
    }

    async fn find(
        &self,
        student_id: &StudentNumber,
        course_id: CourseId,
        term: &Term,
    ) -> Result<Option<RegisteredCourse>> {
        let row = student_course::Entity::find()
            .filter(student_course::Column::StudentId.eq(student_id.as_str()))
            .filter(student_course::Column::CourseId.eq(course_id.to_string()))
            .filter(student_course::Column::Semester.eq(term.semester.number()))
            .filter(student_course::Column::AcademicYear.eq(term.academic_year.as_str()))
            .find_also_related(course::Entity)
            .one(&self.db)
            .await?;

        row.map(|(model, course)| Self::map_model(model, course))
            .transpose()
    }

    async fn roster(&self, course_id: CourseId, term: &Term) -> Result<Vec<RosterRecord>> {
        let registrations = student_course::Entity::find()
            .filter(student_course::Column::CourseId.eq(course_id.to_string()))
            .filter(student_course::Column::Semester.eq(term.semester.number()))
            .filter(student_course::Column::AcademicYear.eq(term.academic_year.as_str()))
            .order_by_asc(student_course::Column::StudentId)
            .all(&self.db)
            .await?;
        if registrations.is_empty() {
            return Ok(Vec::new());
        }

        let students = student::Entity::find()
            .filter(
                student::Column::StudentId
                    .is_in(registrations.iter().map(|r| r.student_id.clone())),
            )
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;

        registrations
            .into_iter()
            .map(|registration| -> Result<RosterRecord> {
                let (student, user) = students
                    .iter()
                    .find(|(student, _)| student.student_id == registration.student_id)
                    .ok_or_else(|| {
                        anyhow!(
                            "registration {} references missing student {}",
                            registration.id,
                            registration.student_id
                        )
                    })?;

                Ok(RosterRecord {
                    student_id: StudentNumber::parse(registration.student_id)?,
                    full_name: user
                        .as_ref()
                        .map(|user| user.full_name.clone())
                        .unwrap_or_default(),
                    department: student.department.clone(),
                    grade: registration.grade,
                    marks: registration.marks,
                })
            })
            .collect()
    }

    async fn apply_batch(
        &self,
        student_id: &StudentNumber,
        mut batch: RegistrationBatch,
    ) -> Result<RegistrationOutcome> {
        let txn = self.db.begin().await?;

        match Self::write_batch(&txn, student_id, &mut batch).await {
            Ok(()) => {
                txn.commit().await?;
                Ok(batch.commit())
            }
            Err(err) => {
                batch.roll_back();
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(
                        student_id = %student_id,
                        error = %rollback_err,
                        "failed to roll back registration batch"
                    );
                }
                Err(err)
            }
        }
    }
}
