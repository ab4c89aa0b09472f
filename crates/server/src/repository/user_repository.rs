use crate::entity::{dean, student, teacher, user};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use registrar_core::domain::{
    AcademicYear, DeanNumber, DeanType, Gender, Role, StudentNumber, TeacherNumber, UserId,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub user_id: UserId,
    pub student_id: StudentNumber,
    pub full_name: String,
    pub registration_number: String,
    pub department: String,
    pub academic_year: AcademicYear,
}

#[derive(Debug, Clone)]
pub struct TeacherRecord {
    pub user_id: UserId,
    pub teacher_id: TeacherNumber,
    pub full_name: String,
    pub employee_id: String,
    pub department: String,
    pub qualification: String,
}

#[derive(Debug, Clone)]
pub struct DeanRecord {
    pub user_id: UserId,
    pub dean_id: DeanNumber,
    pub full_name: String,
    pub department: String,
    pub office_location: String,
    pub dean_type: DeanType,
}

#[derive(Debug, Clone)]
pub enum NewProfile {
    Student {
        student_id: StudentNumber,
        registration_number: String,
        department: String,
        academic_year: AcademicYear,
    },
    Teacher {
        teacher_id: TeacherNumber,
        employee_id: String,
        department: String,
        qualification: String,
    },
    Dean {
        dean_id: DeanNumber,
        department: String,
        appointment_date: NaiveDate,
        office_location: String,
        dean_type: DeanType,
    },
    Admin,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<Gender>,
    pub phone: String,
    pub region: String,
    pub zone: Option<String>,
    pub profile: NewProfile,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Population {
    pub users: u64,
    pub students: u64,
    pub teachers: u64,
    pub deans: u64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user and its role profile in one transaction.
    async fn create(&self, new_user: NewUser) -> Result<UserRecord>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;
    async fn email_exists(&self, email: &str) -> Result<bool>;
    async fn employee_id_exists(&self, employee_id: &str) -> Result<bool>;
    /// Highest sequence number already issued for `role` in `year`.
    async fn last_sequence(&self, role: Role, year: i32) -> Result<u32>;
    async fn business_id(&self, user: &UserRecord) -> Result<Option<String>>;
    async fn find_student(&self, student_id: &StudentNumber) -> Result<Option<StudentRecord>>;
    async fn find_teacher(&self, teacher_id: &TeacherNumber) -> Result<Option<TeacherRecord>>;
    async fn find_dean(&self, dean_id: &DeanNumber) -> Result<Option<DeanRecord>>;
    /// Removes the student's user row; the profile, registrations and
    /// grades go with it.
    async fn delete_student(&self, student_id: &StudentNumber) -> Result<bool>;
    async fn population(&self) -> Result<Population>;
    async fn department_population(&self, department: &str) -> Result<(u64, u64)>;
}

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_role(code: i16) -> Result<Role> {
        match code {
            0 => Ok(Role::Student),
            1 => Ok(Role::Teacher),
            2 => Ok(Role::Dean),
            3 => Ok(Role::Admin),
            _ => Err(anyhow!("invalid users.role code from database: {code}")),
        }
    }

    fn map_role_code(role: Role) -> i16 {
        match role {
            Role::Student => 0,
            Role::Teacher => 1,
            Role::Dean => 2,
            Role::Admin => 3,
        }
    }

    fn map_dean_type(code: i16) -> Result<DeanType> {
        match code {
            0 => Ok(DeanType::Department),
            1 => Ok(DeanType::College),
            _ => Err(anyhow!("invalid deans.dean_type code from database: {code}")),
        }
    }

    fn map_dean_type_code(dean_type: DeanType) -> i16 {
        match dean_type {
            DeanType::Department => 0,
            DeanType::College => 1,
        }
    }

    fn map_user_id(value: &str) -> Result<UserId> {
        UserId::from_str(value).map_err(|e| anyhow!("invalid user id '{value}' from database: {e}"))
    }

    fn map_model(model: user::Model) -> Result<UserRecord> {
        Ok(UserRecord {
            id: Self::map_user_id(&model.id)?,
            username: model.username,
            password_hash: model.password_hash,
            email: model.email,
            full_name: model.full_name,
            role: Self::map_role(model.role)?,
        })
    }

    fn map_student(model: student::Model, user: Option<user::Model>) -> Result<StudentRecord> {
        let user = user.ok_or_else(|| {
            anyhow!("student {} has no user row in database", model.student_id)
        })?;

        Ok(StudentRecord {
            user_id: Self::map_user_id(&model.user_id)?,
            student_id: StudentNumber::parse(model.student_id)?,
            full_name: user.full_name,
            registration_number: model.registration_number,
            department: model.department,
            academic_year: AcademicYear::new(model.academic_year)?,
        })
    }

    fn map_teacher(model: teacher::Model, user: Option<user::Model>) -> Result<TeacherRecord> {
        let user = user.ok_or_else(|| {
            anyhow!("teacher {} has no user row in database", model.teacher_id)
        })?;

        Ok(TeacherRecord {
            user_id: Self::map_user_id(&model.user_id)?,
            teacher_id: TeacherNumber::parse(model.teacher_id)?,
            full_name: user.full_name,
            employee_id: model.employee_id,
            department: model.department,
            qualification: model.qualification,
        })
    }

    fn map_dean(model: dean::Model, user: Option<user::Model>) -> Result<DeanRecord> {
        let user =
            user.ok_or_else(|| anyhow!("dean {} has no user row in database", model.dean_id))?;

        Ok(DeanRecord {
            user_id: Self::map_user_id(&model.user_id)?,
            dean_id: DeanNumber::parse(model.dean_id)?,
            full_name: user.full_name,
            department: model.department,
            office_location: model.office_location,
            dean_type: Self::map_dean_type(model.dean_type)?,
        })
    }

    fn role_of(profile: &NewProfile) -> Role {
        match profile {
            NewProfile::Student { .. } => Role::Student,
            NewProfile::Teacher { .. } => Role::Teacher,
            NewProfile::Dean { .. } => Role::Dean,
            NewProfile::Admin => Role::Admin,
        }
    }

    fn max_sequence<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u32 {
        ids.filter_map(|id| id.strip_prefix(prefix))
            .filter_map(|sequence| sequence.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord> {
        let id = UserId::new();
        let role = Self::role_of(&new_user.profile);

        let txn = self.db.begin().await?;

        let active_model = user::ActiveModel {
            id: Set(id.to_string()),
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
            email: Set(new_user.email),
            full_name: Set(new_user.full_name),
            role: Set(Self::map_role_code(role)),
            date_of_birth: Set(new_user.date_of_birth),
            gender: Set(new_user.gender.map(|gender| gender.as_str().to_string())),
            phone: Set(new_user.phone),
            region: Set(new_user.region),
            zone: Set(new_user.zone),
            ..Default::default()
        };
        let model = active_model.insert(&txn).await?;

        match new_user.profile {
            NewProfile::Student {
                student_id,
                registration_number,
                department,
                academic_year,
            } => {
                student::ActiveModel {
                    user_id: Set(id.to_string()),
                    student_id: Set(student_id.to_string()),
                    registration_number: Set(registration_number),
                    department: Set(department),
                    academic_year: Set(academic_year.to_string()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            NewProfile::Teacher {
                teacher_id,
                employee_id,
                department,
                qualification,
            } => {
                teacher::ActiveModel {
                    user_id: Set(id.to_string()),
                    teacher_id: Set(teacher_id.to_string()),
                    employee_id: Set(employee_id),
                    department: Set(department),
                    qualification: Set(qualification),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            NewProfile::Dean {
                dean_id,
                department,
                appointment_date,
                office_location,
                dean_type,
            } => {
                dean::ActiveModel {
                    user_id: Set(id.to_string()),
                    dean_id: Set(dean_id.to_string()),
                    department: Set(department),
                    appointment_date: Set(appointment_date),
                    office_location: Set(office_location),
                    dean_type: Set(Self::map_dean_type_code(dean_type)),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            NewProfile::Admin => {}
        }

        txn.commit().await?;
        Self::map_model(model)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn employee_id_exists(&self, employee_id: &str) -> Result<bool> {
        let count = teacher::Entity::find()
            .filter(teacher::Column::EmployeeId.eq(employee_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn last_sequence(&self, role: Role, year: i32) -> Result<u32> {
        let sequence = match role {
            Role::Student => {
                let prefix = format!("{}-{year}-", StudentNumber::PREFIX);
                let models = student::Entity::find()
                    .filter(student::Column::StudentId.starts_with(&prefix))
                    .all(&self.db)
                    .await?;
                Self::max_sequence(models.iter().map(|m| m.student_id.as_str()), &prefix)
            }
            Role::Teacher => {
                let prefix = format!("{}-{year}-", TeacherNumber::PREFIX);
                let models = teacher::Entity::find()
                    .filter(teacher::Column::TeacherId.starts_with(&prefix))
                    .all(&self.db)
                    .await?;
                Self::max_sequence(models.iter().map(|m| m.teacher_id.as_str()), &prefix)
            }
            Role::Dean => {
                let prefix = format!("{}-{year}-", DeanNumber::PREFIX);
                let models = dean::Entity::find()
                    .filter(dean::Column::DeanId.starts_with(&prefix))
                    .all(&self.db)
                    .await?;
                Self::max_sequence(models.iter().map(|m| m.dean_id.as_str()), &prefix)
            }
            Role::Admin => 0,
        };

        Ok(sequence)
    }

    async fn business_id(&self, user: &UserRecord) -> Result<Option<String>> {
        let user_id = user.id.to_string();
        let business_id = match user.role {
            Role::Student => student::Entity::find_by_id(user_id)
                .one(&self.db)
                .await?
                .map(|m| m.student_id),
            Role::Teacher => teacher::Entity::find_by_id(user_id)
                .one(&self.db)
                .await?
                .map(|m| m.teacher_id),
            Role::Dean => dean::Entity::find_by_id(user_id)
                .one(&self.db)
                .await?
                .map(|m| m.dean_id),
            Role::Admin => None,
        };

        Ok(business_id)
    }

    async fn find_student(&self, student_id: &StudentNumber) -> Result<Option<StudentRecord>> {
        let found = student::Entity::find()
            .filter(student::Column::StudentId.eq(student_id.as_str()))
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        found
            .map(|(model, user)| Self::map_student(model, user))
            .transpose()
    }

    async fn find_teacher(&self, teacher_id: &TeacherNumber) -> Result<Option<TeacherRecord>> {
        let found = teacher::Entity::find()
            .filter(teacher::Column::TeacherId.eq(teacher_id.as_str()))
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        found
            .map(|(model, user)| Self::map_teacher(model, user))
            .transpose()
    }

    async fn find_dean(&self, dean_id: &DeanNumber) -> Result<Option<DeanRecord>> {
        let found = dean::Entity::find()
            .filter(dean::Column::DeanId.eq(dean_id.as_str()))
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        found.map(|(model, user)| Self::map_dean(model, user)).transpose()
    }

    async fn delete_student(&self, student_id: &StudentNumber) -> Result<bool> {
        let Some(model) = student::Entity::find()
            .filter(student::Column::StudentId.eq(student_id.as_str()))
            .one(&self.db)
            .await?
        else {
            return Ok(false);
        };

        let result = user::Entity::delete_by_id(model.user_id)
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn population(&self) -> Result<Population> {
        Ok(Population {
            users: user::Entity::find().count(&self.db).await?,
            students: student::Entity::find().count(&self.db).await?,
            teachers: teacher::Entity::find().count(&self.db).await?,
            deans: dean::Entity::find().count(&self.db).await?,
        })
    }

    async fn department_population(&self, department: &str) -> Result<(u64, u64)> {
        let students = student::Entity::find()
            .filter(student::Column::Department.eq(department))
            .count(&self.db)
            .await?;
        let teachers = teacher::Entity::find()
            .filter(teacher::Column::Department.eq(department))
            .count(&self.db)
            .await?;

        Ok((students, teachers))
    }
}
