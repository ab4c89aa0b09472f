//! Student-facing routes: offerings, registration, grades and GPA.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use registrar_api_types::{
    CourseOfferingDto, GpaResponse, OfferingsResponse, RegisterCoursesRequest,
    RegistrationResponse, TranscriptEntry, TranscriptResponse,
};
use registrar_core::domain::{
    CourseCode, CourseSelection, GpaPolicy, RegistrationOutcome, YearOfStudy, display_gpa,
    display_grade_point, grade_point_for,
};
use serde::Deserialize;

use super::error::ApiError;
use super::params;
use super::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/students/{student_id}/offerings", get(offerings))
        .route("/api/students/{student_id}/registrations", post(register_courses))
        .route("/api/students/{student_id}/grades", get(transcript))
        .route("/api/students/{student_id}/gpa", get(gpa))
}

#[derive(Debug, Deserialize)]
struct OfferingsQuery {
    academic_year: String,
    semester: i16,
    year_of_study: u8,
}

/// Courses of the student's department for a year and semester.
async fn offerings(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
    Query(query): Query<OfferingsQuery>,
) -> Result<Json<OfferingsResponse>, ApiError> {
    let student_id = params::student_id(&student_id)?;
    let term = params::term(&query.academic_year, query.semester)?;
    let year_of_study = YearOfStudy::new(query.year_of_study)?;

    let offerings = state
        .catalog
        .offerings(&student_id, term, year_of_study)
        .await?;

    Ok(Json(OfferingsResponse {
        student_id: offerings.student.student_id.to_string(),
        academic_year: offerings.term.academic_year.to_string(),
        semester: offerings.term.semester.number(),
        year_of_study: offerings.year_of_study.label().to_string(),
        courses: offerings
            .courses
            .into_iter()
            .map(|status| CourseOfferingDto {
                code: status.offering.code.to_string(),
                name: status.offering.name,
                ects: status.offering.ects,
                credit_hours: status.offering.credit_hours.value(),
                lecture_hours: status.offering.lecture_hours,
                lab_hours: status.offering.lab_hours,
                tutorial_hours: status.offering.tutorial_hours,
                prerequisite: status.offering.prerequisite.map(|code| code.to_string()),
                registered: status.registered,
            })
            .collect(),
        registered_credit_hours: offerings.registered_credits,
        max_credit_hours: offerings.ceiling,
    }))
}

async fn register_courses(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
    Json(request): Json<RegisterCoursesRequest>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let student_id = params::student_id(&student_id)?;
    let term = params::term(&request.academic_year, request.semester)?;
    let mut selection = request
        .course_codes
        .into_iter()
        .map(CourseCode::new)
        .collect::<Result<CourseSelection, _>>()?;

    let outcome = state
        .registration
        .register_courses(&student_id, term, &mut selection)
        .await?;

    Ok(Json(RegistrationResponse {
        student_id: student_id.to_string(),
        academic_year: outcome.term.academic_year.to_string(),
        semester: outcome.term.semester.number(),
        message: registration_message(&outcome),
        inserted: outcome.inserted,
        already_registered: outcome
            .already_registered
            .iter()
            .map(ToString::to_string)
            .collect(),
        seeded: outcome.seeded.iter().map(ToString::to_string).collect(),
        total_credit_hours: outcome.total_credits,
    }))
}

fn registration_message(outcome: &RegistrationOutcome) -> String {
    if outcome.inserted == 0 {
        "All selected courses are already registered.".to_string()
    } else {
        format!(
            "Courses registered successfully! Total credit hours: {}",
            outcome.total_credits
        )
    }
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let student_id = params::student_id(&student_id)?;
    let transcript = state.grading.transcript(&student_id).await?;

    Ok(Json(TranscriptResponse {
        student_id: transcript.student_id.to_string(),
        gpa: display_gpa(transcript.gpa),
        courses: transcript
            .courses
            .into_iter()
            .map(|registration| TranscriptEntry {
                course_code: registration.course.offering.code.to_string(),
                course_name: registration.course.offering.name,
                credit_hours: registration.course.offering.credit_hours.value(),
                academic_year: registration.term.academic_year.to_string(),
                semester: registration.term.semester.number(),
                marks: registration.marks,
                grade_point: display_grade_point(
                    registration.grade.as_deref().and_then(grade_point_for),
                ),
                letter_grade: registration.grade,
            })
            .collect(),
    }))
}

async fn gpa(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<GpaResponse>, ApiError> {
    let student_id = params::student_id(&student_id)?;
    let report = state.grading.compute_gpa(&student_id).await?;

    Ok(Json(GpaResponse {
        student_id: report.student_id.to_string(),
        gpa: display_gpa(report.gpa),
        graded_courses: report.graded_courses,
        policy: match report.policy {
            GpaPolicy::Unweighted => "unweighted",
            GpaPolicy::CreditWeighted => "credit_weighted",
        }
        .to_string(),
    }))
}
