#![allow(dead_code)]

use chrono::NaiveDate;
use registrar_core::domain::{
    AcademicYear, CourseCode, CourseOffering, CourseSelection, CreditHours, DeanNumber, DeanType,
    Semester, StudentNumber, TeacherNumber, Term, YearOfStudy,
};
use registrar_migration::{Migrator, MigratorTrait};
use registrar_server::api::AppState;
use registrar_server::config::RegistrarConfig;
use registrar_server::repository::{NewProfile, NewUser};
use registrar_server::service::Repositories;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub const DEPARTMENT: &str = "Computer Science";

pub struct TestApp {
    pub db: DatabaseConnection,
    pub repos: Repositories,
    pub state: AppState,
}

/// Fresh in-memory database with every migration applied.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite should connect");
    Migrator::up(&db, None)
        .await
        .expect("migrations should apply");
    db
}

/// Defaults with cheap password hashing.
pub fn test_config() -> RegistrarConfig {
    let mut config = RegistrarConfig::default();
    config.security.password_memory_kib = 1024;
    config.security.password_iterations = 1;
    config
}

pub async fn test_app() -> TestApp {
    test_app_with(test_config()).await
}

pub async fn test_app_with(config: RegistrarConfig) -> TestApp {
    let db = test_db().await;
    let repos = Repositories::sea_orm(db.clone());
    let state = AppState::new(db.clone(), &config).expect("state should build");

    TestApp { db, repos, state }
}

pub fn term(academic_year: &str, semester: Semester) -> Term {
    Term::new(
        AcademicYear::new(academic_year).expect("valid academic year"),
        semester,
    )
}

pub fn first_term() -> Term {
    term("2024/2025", Semester::First)
}

pub fn code(value: &str) -> CourseCode {
    CourseCode::new(value).expect("valid course code")
}

pub fn selection(codes: &[&str]) -> CourseSelection {
    codes.iter().map(|value| code(value)).collect()
}

/// A course outside the built-in curriculum.
pub fn offering(value: &str, credit_hours: i64) -> CourseOffering {
    CourseOffering {
        code: code(value),
        name: format!("Test course {value}"),
        ects: 5,
        credit_hours: CreditHours::new(credit_hours).expect("valid credit hours"),
        lecture_hours: 2,
        lab_hours: 0,
        tutorial_hours: 0,
        department: DEPARTMENT.to_string(),
        year_of_study: YearOfStudy::SECOND,
        semester: Semester::First,
        prerequisite: None,
    }
}

fn new_user(handle: &str, profile: NewProfile) -> NewUser {
    NewUser {
        username: handle.to_string(),
        password_hash: "unused".to_string(),
        email: format!("{handle}@dilla.edu.et"),
        full_name: format!("{handle} Tester"),
        date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"),
        gender: None,
        phone: "0911223344".to_string(),
        region: "Sidama".to_string(),
        zone: None,
        profile,
    }
}

pub async fn create_student(app: &TestApp, sequence: u32, department: &str) -> StudentNumber {
    let student_id = StudentNumber::generate(2024, sequence);
    let profile = NewProfile::Student {
        student_id: student_id.clone(),
        registration_number: format!("RU/{sequence:04}/16"),
        department: department.to_string(),
        academic_year: AcademicYear::new("2024/2025").expect("valid academic year"),
    };

    app.repos
        .users
        .create(new_user(&format!("student{sequence}"), profile))
        .await
        .expect("student should be created");
    student_id
}

pub async fn create_teacher(app: &TestApp, sequence: u32, department: &str) -> TeacherNumber {
    let teacher_id = TeacherNumber::generate(2024, sequence);
    let profile = NewProfile::Teacher {
        teacher_id: teacher_id.clone(),
        employee_id: format!("EMP-{sequence}"),
        department: department.to_string(),
        qualification: "MSc".to_string(),
    };

    app.repos
        .users
        .create(new_user(&format!("teacher{sequence}"), profile))
        .await
        .expect("teacher should be created");
    teacher_id
}

pub async fn create_dean(app: &TestApp, sequence: u32, department: &str) -> DeanNumber {
    let dean_id = DeanNumber::generate(2024, sequence);
    let profile = NewProfile::Dean {
        dean_id: dean_id.clone(),
        department: department.to_string(),
        appointment_date: NaiveDate::from_ymd_opt(2020, 9, 1).expect("valid date"),
        office_location: "Block 12".to_string(),
        dean_type: DeanType::Department,
    };

    app.repos
        .users
        .create(new_user(&format!("dean{sequence}"), profile))
        .await
        .expect("dean should be created");
    dean_id
}
