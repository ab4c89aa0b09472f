mod common;

use chrono::NaiveDate;
use common::{DEPARTMENT, create_teacher, first_term, selection, test_app};
use registrar_core::domain::{
    AccountForm, DeanType, DomainError, Gender, ProfileForm, Role, StudentNumber,
};
use registrar_server::error::ServiceError;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

fn student_form(username: &str, email: &str) -> AccountForm {
    AccountForm {
        first_name: "Hana".to_string(),
        last_name: "Girma".to_string(),
        gender: Some(Gender::Female),
        phone: "0911223344".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2004, 3, 9),
        region: Some("Sidama".to_string()),
        zone: Some("Gedeo".to_string()),
        email: email.to_string(),
        username: username.to_string(),
        password: "password1".to_string(),
        confirm_password: "password1".to_string(),
        profile: ProfileForm::Student {
            registration_number: "RU/1234/16".to_string(),
            academic_year: Some("2024/2025".to_string()),
            department: Some(DEPARTMENT.to_string()),
        },
    }
}

#[tokio::test]
async fn test_register_student_numbers_accounts_per_year() {
    let app = test_app().await;

    let first = app
        .state
        .accounts
        .register(student_form("hana", "hana@dilla.edu.et"), today())
        .await
        .expect("first student");
    let second = app
        .state
        .accounts
        .register(student_form("liya", "liya@dilla.edu.et"), today())
        .await
        .expect("second student");

    assert_eq!(first.user.role, Role::Student);
    assert_eq!(first.user.full_name, "Hana Girma");
    assert_eq!(
        first.business_id.as_deref(),
        Some(StudentNumber::generate(2026, 1).as_str())
    );
    assert_eq!(
        second.business_id.as_deref(),
        Some(StudentNumber::generate(2026, 2).as_str())
    );
    assert!(first.user.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_sequence_continues_after_a_deletion() {
    let app = test_app().await;
    for (username, email) in [("hana", "hana@dilla.edu.et"), ("liya", "liya@dilla.edu.et")] {
        app.state
            .accounts
            .register(student_form(username, email), today())
            .await
            .expect("student");
    }

    app.state
        .accounts
        .delete_student(&StudentNumber::generate(2026, 1))
        .await
        .expect("delete first student");
    let third = app
        .state
        .accounts
        .register(student_form("sara", "sara@dilla.edu.et"), today())
        .await
        .expect("third student");

    assert_eq!(
        third.business_id.as_deref(),
        Some(StudentNumber::generate(2026, 3).as_str())
    );
}

#[tokio::test]
async fn test_duplicate_username_and_email_are_field_conflicts() {
    let app = test_app().await;
    app.state
        .accounts
        .register(student_form("hana", "hana@dilla.edu.et"), today())
        .await
        .expect("first student");

    let err = app
        .state
        .accounts
        .register(student_form("hana", "other@dilla.edu.et"), today())
        .await
        .expect_err("username taken");
    assert!(matches!(err, ServiceError::Conflict { field: "username", .. }));
    assert_eq!(err.to_string(), "Username already exists");

    let err = app
        .state
        .accounts
        .register(student_form("other", "hana@dilla.edu.et"), today())
        .await
        .expect_err("email taken");
    assert!(matches!(err, ServiceError::Conflict { field: "email", .. }));
}

#[tokio::test]
async fn test_duplicate_employee_id_is_a_field_conflict() {
    let app = test_app().await;
    create_teacher(&app, 1, DEPARTMENT).await;

    let form = AccountForm {
        profile: ProfileForm::Teacher {
            employee_id: "EMP-1".to_string(),
            department: Some(DEPARTMENT.to_string()),
            qualification: "PhD".to_string(),
        },
        ..student_form("newteacher", "newteacher@dilla.edu.et")
    };
    let err = app
        .state
        .accounts
        .register(form, today())
        .await
        .expect_err("employee id taken");

    assert!(matches!(err, ServiceError::Conflict { field: "employee_id", .. }));
}

#[tokio::test]
async fn test_invalid_form_reports_every_field() {
    let app = test_app().await;
    let form = AccountForm {
        phone: "12".to_string(),
        email: "not-an-email".to_string(),
        confirm_password: "different".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2015, 1, 1),
        ..student_form("hana", "hana@dilla.edu.et")
    };

    let err = app
        .state
        .accounts
        .register(form, today())
        .await
        .expect_err("invalid form");

    let ServiceError::Domain(DomainError::InvalidFields(fields)) = err else {
        panic!("expected field errors, got {err:?}");
    };
    assert_eq!(fields.message_for("phone"), Some("Phone number must be 9-10 digits"));
    assert_eq!(fields.message_for("email"), Some("Invalid email format"));
    assert_eq!(fields.message_for("confirm_password"), Some("Passwords do not match"));
    assert_eq!(fields.message_for("date_of_birth"), Some("Must be at least 18 years old"));
    assert_eq!(
        app.repos.users.population().await.expect("population").users,
        0
    );
}

#[tokio::test]
async fn test_dean_account_gets_a_dean_number() {
    let app = test_app().await;
    let form = AccountForm {
        profile: ProfileForm::Dean {
            department: Some(DEPARTMENT.to_string()),
            appointment_date: NaiveDate::from_ymd_opt(2021, 9, 1),
            office_location: "Block 3, Room 12".to_string(),
            dean_type: Some(DeanType::College),
        },
        ..student_form("dean", "dean@dilla.edu.et")
    };

    let created = app
        .state
        .accounts
        .register(form, today())
        .await
        .expect("dean account");

    assert_eq!(created.user.role, Role::Dean);
    assert_eq!(created.business_id.as_deref(), Some("D-2026-001"));
}

#[tokio::test]
async fn test_login_checks_password_and_role() {
    let app = test_app().await;
    app.state
        .accounts
        .register(student_form("hana", "hana@dilla.edu.et"), today())
        .await
        .expect("student");

    let session = app
        .state
        .accounts
        .login("hana", "password1", Role::Student)
        .await
        .expect("login");
    assert_eq!(session.user.username, "hana");
    assert!(session.business_id.is_some());

    for (username, password, role) in [
        ("hana", "wrong-password", Role::Student),
        ("hana", "password1", Role::Teacher),
        ("nobody", "password1", Role::Student),
    ] {
        let err = app
            .state
            .accounts
            .login(username, password, role)
            .await
            .expect_err("login should fail");
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }
}

#[tokio::test]
async fn test_deleting_a_student_cascades() {
    let app = test_app().await;
    let created = app
        .state
        .accounts
        .register(student_form("hana", "hana@dilla.edu.et"), today())
        .await
        .expect("student");
    let student: StudentNumber = created
        .business_id
        .expect("student number")
        .parse()
        .expect("valid student number");

    let mut picked = selection(&["CoSc2021"]);
    app.state
        .registration
        .register_courses(&student, first_term(), &mut picked)
        .await
        .expect("registration");

    app.state
        .accounts
        .delete_student(&student)
        .await
        .expect("delete");

    assert!(
        app.repos
            .users
            .find_student(&student)
            .await
            .expect("lookup")
            .is_none()
    );
    assert!(
        app.repos
            .registrations
            .list_for_student(&student)
            .await
            .expect("registrations")
            .is_empty()
    );

    let err = app
        .state
        .accounts
        .delete_student(&student)
        .await
        .expect_err("already deleted");
    assert!(matches!(err, ServiceError::NotFound { entity: "student", .. }));
}
