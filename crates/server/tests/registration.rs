mod common;

use common::{DEPARTMENT, code, create_student, first_term, offering, selection, test_app};
use registrar_core::domain::{CourseSelection, DomainError};
use registrar_server::error::ServiceError;
use sea_orm::ConnectionTrait;

async fn catalogue(app: &common::TestApp, courses: &[(&str, i64)]) {
    for (value, credit_hours) in courses {
        app.repos
            .courses
            .upsert(&offering(value, *credit_hours))
            .await
            .expect("course should be stored");
    }
}

async fn registered_count(app: &common::TestApp, student: &registrar_core::domain::StudentNumber) -> usize {
    app.repos
        .registrations
        .list_for_term(student, &first_term())
        .await
        .expect("registrations should load")
        .len()
}

#[tokio::test]
async fn test_credit_ceiling_rejects_the_whole_batch() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;
    catalogue(
        &app,
        &[
            ("TST101", 3),
            ("TST102", 3),
            ("TST103", 3),
            ("TST104", 3),
            ("TST105", 3),
            ("TST106", 3),
            ("BIG201", 5),
            ("BIG202", 5),
        ],
    )
    .await;

    let mut existing = selection(&["TST101", "TST102", "TST103", "TST104", "TST105", "TST106"]);
    let outcome = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut existing)
        .await
        .expect("18 credit hours fit under the ceiling");
    assert_eq!(outcome.total_credits, 18);

    let mut extra = selection(&["BIG201", "BIG202"]);
    let err = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut extra)
        .await
        .expect_err("28 credit hours exceed the ceiling");

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::CreditLimitExceeded {
            registered: 18,
            requested: 10,
            ceiling: 21,
        })
    ));
    assert_eq!(registered_count(&app, &student).await, 6);
    assert!(extra.is_empty(), "selection is drained even when rejected");
}

#[tokio::test]
async fn test_credit_ceiling_admits_a_batch_up_to_the_limit() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;
    catalogue(
        &app,
        &[
            ("TST101", 3),
            ("TST102", 3),
            ("TST103", 3),
            ("TST104", 3),
            ("TST105", 3),
            ("BIG201", 5),
        ],
    )
    .await;

    let mut existing = selection(&["TST101", "TST102", "TST103", "TST104", "TST105"]);
    app.state
        .registration
        .register_courses(&student, first_term(), &mut existing)
        .await
        .expect("15 credit hours fit");

    let mut extra = selection(&["BIG201"]);
    let outcome = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut extra)
        .await
        .expect("20 credit hours fit");

    assert_eq!(outcome.inserted, 1);
    assert_eq!(outcome.total_credits, 20);
    assert_eq!(registered_count(&app, &student).await, 6);
}

#[tokio::test]
async fn test_concurrent_batches_cannot_pass_the_ceiling_together() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;
    catalogue(&app, &[("AAA101", 15), ("BBB101", 15)]).await;

    let mut first = selection(&["AAA101"]);
    let mut second = selection(&["BBB101"]);
    let (left, right) = tokio::join!(
        app.state
            .registration
            .register_courses(&student, first_term(), &mut first),
        app.state
            .registration
            .register_courses(&student, first_term(), &mut second),
    );

    let results = [left, right];
    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(results.iter().any(|result| matches!(
        result,
        Err(ServiceError::Domain(DomainError::CreditLimitExceeded { ceiling: 21, .. }))
    )));

    let registrations = app
        .repos
        .registrations
        .list_for_term(&student, &first_term())
        .await
        .expect("registrations should load");
    let total: u16 = registrations
        .iter()
        .map(|registration| registration.course.offering.credit_hours.value())
        .sum();
    assert_eq!(registrations.len(), 1);
    assert_eq!(total, 15);
}

#[tokio::test]
async fn test_reregistration_is_a_successful_no_op() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;
    app.state.catalog.seed().await.expect("catalog should seed");

    let mut first = selection(&["CoSc2021", "MATH2011"]);
    let outcome = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut first)
        .await
        .expect("first registration");
    assert_eq!(outcome.inserted, 2);

    let mut again = selection(&["CoSc2021", "MATH2011"]);
    let outcome = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut again)
        .await
        .expect("re-registration succeeds");

    assert_eq!(outcome.inserted, 0);
    assert_eq!(
        outcome.already_registered,
        vec![code("CoSc2021"), code("MATH2011")]
    );
    assert_eq!(outcome.total_credits, 6);
    assert_eq!(registered_count(&app, &student).await, 2);
}

#[tokio::test]
async fn test_partial_duplicates_only_insert_new_courses() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;

    let mut first = selection(&["CoSc2021"]);
    app.state
        .registration
        .register_courses(&student, first_term(), &mut first)
        .await
        .expect("first registration");

    let mut mixed = selection(&["CoSc2021", "ECON2103"]);
    let outcome = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut mixed)
        .await
        .expect("mixed registration");

    assert_eq!(outcome.inserted, 1);
    assert_eq!(outcome.already_registered, vec![code("CoSc2021")]);
    assert_eq!(outcome.total_credits, 5);
}

#[tokio::test]
async fn test_uncatalogued_course_is_seeded_exactly_once() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;
    assert_eq!(app.repos.courses.count().await.expect("count"), 0);

    let mut picked = selection(&["CoSc2021"]);
    let outcome = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut picked)
        .await
        .expect("registration seeds the course");

    assert_eq!(outcome.seeded, vec![code("CoSc2021")]);
    assert_eq!(outcome.inserted, 1);
    assert_eq!(app.repos.courses.count().await.expect("count"), 1);

    let seeded = app
        .repos
        .courses
        .find_by_code(&code("CoSc2021"))
        .await
        .expect("lookup")
        .expect("course row exists");
    assert_eq!(seeded.offering.name, "Digital Logic Design");
    assert_eq!(seeded.offering.credit_hours.value(), 3);

    let other = create_student(&app, 2, DEPARTMENT).await;
    let mut picked = selection(&["CoSc2021"]);
    let outcome = app
        .state
        .registration
        .register_courses(&other, first_term(), &mut picked)
        .await
        .expect("second student reuses the row");

    assert!(outcome.seeded.is_empty());
    assert_eq!(app.repos.courses.count().await.expect("count"), 1);
}

#[tokio::test]
async fn test_failure_mid_batch_leaves_no_rows_behind() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;
    catalogue(&app, &[("ZZZ101", 3)]).await;

    app.db
        .execute_unprepared(
            "CREATE TRIGGER fail_zzz BEFORE INSERT ON student_course_registrations \
             WHEN NEW.course_id IN (SELECT id FROM courses WHERE course_code = 'ZZZ101') \
             BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
        )
        .await
        .expect("trigger should be created");

    let mut picked = selection(&["CoSc2021", "ZZZ101"]);
    let err = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut picked)
        .await
        .expect_err("the trigger aborts the batch");

    assert!(matches!(err, ServiceError::Internal(_)));
    assert_eq!(registered_count(&app, &student).await, 0);
    assert!(
        app.repos
            .courses
            .find_by_code(&code("CoSc2021"))
            .await
            .expect("lookup")
            .is_none(),
        "seeding is rolled back with the batch"
    );
}

#[tokio::test]
async fn test_code_outside_catalog_and_curriculum_is_rejected() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;

    let mut picked = selection(&["CoSc2021", "XYZ999"]);
    let err = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut picked)
        .await
        .expect_err("unknown code");

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::UnknownCourse(ref unknown)) if unknown == &code("XYZ999")
    ));
    assert_eq!(registered_count(&app, &student).await, 0);
    assert_eq!(app.repos.courses.count().await.expect("count"), 0);
}

#[tokio::test]
async fn test_empty_selection_is_rejected() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;

    let mut picked = CourseSelection::new();
    let err = app
        .state
        .registration
        .register_courses(&student, first_term(), &mut picked)
        .await
        .expect_err("nothing selected");

    assert!(matches!(err, ServiceError::Domain(DomainError::EmptySelection)));
}

#[tokio::test]
async fn test_unknown_student_is_not_found() {
    let app = test_app().await;
    let ghost = registrar_core::domain::StudentNumber::generate(2024, 99);

    let mut picked = selection(&["CoSc2021"]);
    let err = app
        .state
        .registration
        .register_courses(&ghost, first_term(), &mut picked)
        .await
        .expect_err("no such student");

    assert!(matches!(err, ServiceError::NotFound { entity: "student", .. }));
}

#[tokio::test]
async fn test_offerings_flag_registered_courses() {
    let app = test_app().await;
    let student = create_student(&app, 1, DEPARTMENT).await;

    let mut picked = selection(&["CoSc2021", "MATH2053"]);
    app.state
        .registration
        .register_courses(&student, first_term(), &mut picked)
        .await
        .expect("registration");

    let offerings = app
        .state
        .catalog
        .offerings(
            &student,
            first_term(),
            registrar_core::domain::YearOfStudy::SECOND,
        )
        .await
        .expect("offerings");

    assert_eq!(offerings.courses.len(), 7);
    assert_eq!(offerings.registered_credits, 6);
    assert_eq!(offerings.ceiling, 21);
    let registered: Vec<_> = offerings
        .courses
        .iter()
        .filter(|status| status.registered)
        .map(|status| status.offering.code.to_string())
        .collect();
    assert_eq!(registered, vec!["CoSc2021", "MATH2053"]);
}
