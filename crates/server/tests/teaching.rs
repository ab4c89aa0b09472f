mod common;

use common::{
    DEPARTMENT, code, create_dean, create_student, create_teacher, first_term, selection,
    test_app,
};
use registrar_core::domain::{AssessmentKind, AssessmentSheet, DomainError, ReportStatus};
use registrar_server::error::ServiceError;
use registrar_server::service::{GradeSubmission, NewReportForm};

fn report(title: &str) -> NewReportForm {
    NewReportForm {
        report_type: "attendance".to_string(),
        title: title.to_string(),
        description: "Weekly attendance summary".to_string(),
    }
}

#[tokio::test]
async fn test_assigning_a_course_twice_is_a_no_op() {
    let app = test_app().await;
    let teacher = create_teacher(&app, 1, DEPARTMENT).await;

    let first = app
        .state
        .teaching
        .assign_course(&teacher, &code("CoSc3023"), &first_term())
        .await
        .expect("first assignment");
    let second = app
        .state
        .teaching
        .assign_course(&teacher, &code("CoSc3023"), &first_term())
        .await
        .expect("repeat assignment");

    assert!(first);
    assert!(!second);
    let assignments = app
        .state
        .teaching
        .assignments(&teacher)
        .await
        .expect("assignments");
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].course_code, code("CoSc3023"));
    assert_eq!(app.repos.courses.count().await.expect("count"), 1);
}

#[tokio::test]
async fn test_assigning_an_unknown_course_fails() {
    let app = test_app().await;
    let teacher = create_teacher(&app, 1, DEPARTMENT).await;

    let err = app
        .state
        .teaching
        .assign_course(&teacher, &code("NOPE100"), &first_term())
        .await
        .expect_err("unknown course");

    assert!(matches!(err, ServiceError::Domain(DomainError::UnknownCourse(_))));
}

#[tokio::test]
async fn test_roster_lists_registered_students_with_grades() {
    let app = test_app().await;
    let teacher = create_teacher(&app, 1, DEPARTMENT).await;
    let graded = create_student(&app, 1, DEPARTMENT).await;
    let ungraded = create_student(&app, 2, DEPARTMENT).await;
    for student in [&graded, &ungraded] {
        let mut picked = selection(&["CoSc2041"]);
        app.state
            .registration
            .register_courses(student, first_term(), &mut picked)
            .await
            .expect("registration");
    }

    let mut sheet = AssessmentSheet::new();
    sheet
        .record(AssessmentKind::FinalExam, 40.0)
        .expect("valid score");
    sheet.record(AssessmentKind::MidExam, 16.0).expect("valid score");
    app.state
        .grading
        .submit_grade(
            &teacher,
            GradeSubmission {
                student_id: graded.clone(),
                course_code: code("CoSc2041"),
                term: first_term(),
                sheet,
            },
        )
        .await
        .expect("grade");

    let roster = app
        .state
        .teaching
        .roster(&teacher, &code("CoSc2041"), &first_term())
        .await
        .expect("roster");

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].student_id, graded);
    assert_eq!(roster[0].grade.as_deref(), Some("C"));
    assert_eq!(roster[0].marks, Some(56.0));
    assert_eq!(roster[0].full_name, "student1 Tester");
    assert_eq!(roster[1].student_id, ungraded);
    assert_eq!(roster[1].grade, None);
}

#[tokio::test]
async fn test_reports_start_pending_and_list_newest_first() {
    let app = test_app().await;
    let teacher = create_teacher(&app, 1, DEPARTMENT).await;

    let first = app
        .state
        .reports
        .submit_report(&teacher, report("Week 1"))
        .await
        .expect("first report");
    assert_eq!(first.status, ReportStatus::Pending);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    app.state
        .reports
        .submit_report(&teacher, report("Week 2"))
        .await
        .expect("second report");

    let reports = app
        .state
        .reports
        .reports_for(&teacher)
        .await
        .expect("reports");
    let titles: Vec<_> = reports.iter().map(|report| report.title.as_str()).collect();
    assert_eq!(titles, vec!["Week 2", "Week 1"]);
}

#[tokio::test]
async fn test_blank_report_is_rejected() {
    let app = test_app().await;
    let teacher = create_teacher(&app, 1, DEPARTMENT).await;

    let err = app
        .state
        .reports
        .submit_report(&teacher, report(" "))
        .await
        .expect_err("blank title");

    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidFields(_))));
    assert!(
        app.state
            .reports
            .reports_for(&teacher)
            .await
            .expect("reports")
            .is_empty()
    );
}

#[tokio::test]
async fn test_admin_summary_counts_everything() {
    let app = test_app().await;
    create_student(&app, 1, DEPARTMENT).await;
    create_student(&app, 2, DEPARTMENT).await;
    create_teacher(&app, 1, DEPARTMENT).await;
    create_dean(&app, 1, DEPARTMENT).await;
    app.state.catalog.seed().await.expect("seed");

    let summary = app.state.reports.admin_summary().await.expect("summary");

    assert_eq!(summary.population.users, 4);
    assert_eq!(summary.population.students, 2);
    assert_eq!(summary.population.teachers, 1);
    assert_eq!(summary.population.deans, 1);
    assert_eq!(summary.courses, 36);
}

#[tokio::test]
async fn test_dean_summary_covers_only_the_department() {
    let app = test_app().await;
    let dean = create_dean(&app, 1, DEPARTMENT).await;
    let teacher = create_teacher(&app, 1, DEPARTMENT).await;
    create_teacher(&app, 2, "Mathematics").await;
    let student = create_student(&app, 1, DEPARTMENT).await;
    create_student(&app, 2, "Mathematics").await;

    let summary = app.state.reports.dean_summary(&dean).await.expect("summary");
    assert_eq!(summary.students, 1);
    assert_eq!(summary.teachers, 1);
    assert_eq!(summary.average_marks, None);

    let mut picked = selection(&["CoSc2021", "MATH2011"]);
    app.state
        .registration
        .register_courses(&student, first_term(), &mut picked)
        .await
        .expect("registration");
    for (course, final_exam) in [("CoSc2021", 50.0), ("MATH2011", 30.0)] {
        let mut sheet = AssessmentSheet::new();
        sheet
            .record(AssessmentKind::FinalExam, final_exam)
            .expect("valid score");
        app.state
            .grading
            .submit_grade(
                &teacher,
                GradeSubmission {
                    student_id: student.clone(),
                    course_code: code(course),
                    term: first_term(),
                    sheet,
                },
            )
            .await
            .expect("grade");
    }

    let summary = app.state.reports.dean_summary(&dean).await.expect("summary");
    assert_eq!(summary.dean.department, DEPARTMENT);
    assert_eq!(summary.average_marks, Some(40.0));
}
