//! Teacher routes: course assignment, rosters, grading and reports.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use registrar_api_types::{
    AssignCourseRequest, AssignedCourse, AssignmentResponse, AssignmentsResponse, GradeResponse,
    ReportDto, ReportsResponse, RosterEntry, RosterResponse, SubmitGradeRequest,
    SubmitReportRequest,
};
use registrar_core::domain::{AssessmentKind, AssessmentSheet, CourseCode, StudentNumber};
use serde::Deserialize;

use super::error::ApiError;
use super::params;
use super::state::AppState;
use crate::repository::ReportRecord;
use crate::service::{GradeSubmission, NewReportForm};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/teachers/{teacher_id}/assignments",
            get(list_assignments).post(assign_course),
        )
        .route("/api/teachers/{teacher_id}/roster", get(roster))
        .route("/api/teachers/{teacher_id}/grades", post(submit_grade))
        .route(
            "/api/teachers/{teacher_id}/reports",
            get(list_reports).post(submit_report),
        )
}

async fn assign_course(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<String>,
    Json(request): Json<AssignCourseRequest>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let teacher_id = params::teacher_id(&teacher_id)?;
    let course_code = CourseCode::new(request.course_code)?;
    let term = params::term(&request.academic_year, request.semester)?;

    let assigned = state
        .teaching
        .assign_course(&teacher_id, &course_code, &term)
        .await?;

    Ok(Json(AssignmentResponse {
        teacher_id: teacher_id.to_string(),
        course_code: course_code.to_string(),
        assigned,
    }))
}

async fn list_assignments(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<String>,
) -> Result<Json<AssignmentsResponse>, ApiError> {
    let teacher_id = params::teacher_id(&teacher_id)?;
    let assignments = state.teaching.assignments(&teacher_id).await?;

    Ok(Json(AssignmentsResponse {
        teacher_id: teacher_id.to_string(),
        courses: assignments
            .into_iter()
            .map(|assignment| AssignedCourse {
                course_code: assignment.course_code.to_string(),
                academic_year: assignment.term.academic_year.to_string(),
                semester: assignment.term.semester.number(),
            })
            .collect(),
    }))
}

#[derive(Debug, Deserialize)]
struct RosterQuery {
    course_code: String,
    academic_year: String,
    semester: i16,
}

/// Students registered for one course in one term.
async fn roster(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<String>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<RosterResponse>, ApiError> {
    let teacher_id = params::teacher_id(&teacher_id)?;
    let course_code = CourseCode::new(query.course_code)?;
    let term = params::term(&query.academic_year, query.semester)?;

    let students = state
        .teaching
        .roster(&teacher_id, &course_code, &term)
        .await?;

    Ok(Json(RosterResponse {
        course_code: course_code.to_string(),
        academic_year: term.academic_year.to_string(),
        semester: term.semester.number(),
        students: students
            .into_iter()
            .map(|entry| RosterEntry {
                student_id: entry.student_id.to_string(),
                full_name: entry.full_name,
                department: entry.department,
                grade: entry.grade,
                marks: entry.marks,
            })
            .collect(),
    }))
}

async fn submit_grade(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<String>,
    Json(request): Json<SubmitGradeRequest>,
) -> Result<Json<GradeResponse>, ApiError> {
    let teacher_id = params::teacher_id(&teacher_id)?;
    let student_id = StudentNumber::parse(request.student_id)?;
    let course_code = CourseCode::new(request.course_code)?;
    let term = params::term(&request.academic_year, request.semester)?;

    let mut sheet = AssessmentSheet::new();
    for (kind, score) in &request.assessments {
        sheet.record(kind.parse::<AssessmentKind>()?, *score)?;
    }

    let record = state
        .grading
        .submit_grade(
            &teacher_id,
            GradeSubmission {
                student_id,
                course_code,
                term,
                sheet,
            },
        )
        .await?;

    Ok(Json(GradeResponse {
        student_id: record.student_id,
        course_code: record.course_code,
        total_marks: record.total_marks,
        letter_grade: record.letter_grade,
        grade_point: record.grade_point,
        comments: record.comments.unwrap_or_default(),
    }))
}

async fn submit_report(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<String>,
    Json(request): Json<SubmitReportRequest>,
) -> Result<(StatusCode, Json<ReportDto>), ApiError> {
    let teacher_id = params::teacher_id(&teacher_id)?;
    let report = state
        .reports
        .submit_report(
            &teacher_id,
            NewReportForm {
                report_type: request.report_type,
                title: request.title,
                description: request.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(report_dto(report))))
}

async fn list_reports(
    State(state): State<Arc<AppState>>,
    Path(teacher_id): Path<String>,
) -> Result<Json<ReportsResponse>, ApiError> {
    let teacher_id = params::teacher_id(&teacher_id)?;
    let reports = state.reports.reports_for(&teacher_id).await?;

    Ok(Json(ReportsResponse {
        reports: reports.into_iter().map(report_dto).collect(),
    }))
}

fn report_dto(report: ReportRecord) -> ReportDto {
    ReportDto {
        id: report.id.to_string(),
        teacher_id: report.teacher_id.to_string(),
        report_type: report.report_type,
        title: report.title,
        description: report.description,
        status: report.status.to_string(),
        submitted_at: report.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}
