//! Shared request/response types used by API-facing crates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Per-field messages for rejected forms; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
    /// `DU-…`, `T-…` or `D-…` for students, teachers and deans.
    pub business_id: Option<String>,
}

/// Account registration form. Role-specific fields are only read for
/// the role they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    pub phone: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub office_location: Option<String>,
    #[serde(default)]
    pub dean_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountResponse {
    pub user_id: String,
    pub role: String,
    pub business_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteStudentResponse {
    pub student_id: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCatalogResponse {
    pub courses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOfferingDto {
    pub code: String,
    pub name: String,
    pub ects: u16,
    pub credit_hours: u16,
    pub lecture_hours: u16,
    pub lab_hours: u16,
    pub tutorial_hours: u16,
    pub prerequisite: Option<String>,
    pub registered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingsResponse {
    pub student_id: String,
    pub academic_year: String,
    pub semester: i16,
    pub year_of_study: String,
    pub courses: Vec<CourseOfferingDto>,
    pub registered_credit_hours: u16,
    pub max_credit_hours: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCoursesRequest {
    pub academic_year: String,
    pub semester: i16,
    pub course_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub student_id: String,
    pub academic_year: String,
    pub semester: i16,
    pub inserted: u64,
    pub already_registered: Vec<String>,
    pub seeded: Vec<String>,
    pub total_credit_hours: u16,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub course_code: String,
    pub course_name: String,
    pub credit_hours: u16,
    pub academic_year: String,
    pub semester: i16,
    pub marks: Option<f64>,
    pub letter_grade: Option<String>,
    /// Grade point with one decimal, or `N/A`.
    pub grade_point: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub student_id: String,
    pub courses: Vec<TranscriptEntry>,
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpaResponse {
    pub student_id: String,
    /// Two decimals, or `N/A` when nothing is graded.
    pub gpa: String,
    pub graded_courses: usize,
    pub policy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitGradeRequest {
    pub student_id: String,
    pub course_code: String,
    pub academic_year: String,
    pub semester: i16,
    /// Keyed by assessment kind, e.g. `FINAL_EXAM` or `Mid Exam`.
    pub assessments: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResponse {
    pub student_id: String,
    pub course_code: String,
    pub total_marks: f64,
    pub letter_grade: String,
    pub grade_point: f64,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignCourseRequest {
    pub course_code: String,
    pub academic_year: String,
    pub semester: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub teacher_id: String,
    pub course_code: String,
    /// `false` when the teacher already held the course that term.
    pub assigned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedCourse {
    pub course_code: String,
    pub academic_year: String,
    pub semester: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentsResponse {
    pub teacher_id: String,
    pub courses: Vec<AssignedCourse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub student_id: String,
    pub full_name: String,
    pub department: String,
    pub grade: Option<String>,
    pub marks: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResponse {
    pub course_code: String,
    pub academic_year: String,
    pub semester: i16,
    pub students: Vec<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReportRequest {
    pub report_type: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDto {
    pub id: String,
    pub teacher_id: String,
    pub report_type: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub submitted_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsResponse {
    pub reports: Vec<ReportDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub users: u64,
    pub students: u64,
    pub teachers: u64,
    pub deans: u64,
    pub courses: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeanSummary {
    pub dean_id: String,
    pub department: String,
    pub students: u64,
    pub teachers: u64,
    pub average_marks: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_ok_payload() {
        let response = HealthCheckResponse::ok();
        assert_eq!(response.status, "ok");
    }

    #[test]
    fn error_response_omits_empty_fields() {
        let response = ErrorResponse {
            code: "conflict".to_string(),
            message: "username already exists".to_string(),
            fields: Vec::new(),
        };

        let json = serde_json::to_value(&response).expect("serialize error response");

        assert!(json.get("fields").is_none());
        let decoded: ErrorResponse =
            serde_json::from_value(json).expect("deserialize error response");
        assert_eq!(decoded, response);
    }

    #[test]
    fn account_request_accepts_missing_role_fields() {
        let raw = r#"{
            "role": "admin",
            "first_name": "Sara",
            "last_name": "Tesfaye",
            "phone": "0911223344",
            "date_of_birth": "1990-01-01",
            "region": "Sidama",
            "email": "sara@dilla.edu.et",
            "username": "sara",
            "password": "password1",
            "confirm_password": "password1"
        }"#;

        let request: CreateAccountRequest =
            serde_json::from_str(raw).expect("deserialize account request");

        assert_eq!(request.role, "admin");
        assert!(request.employee_id.is_none());
        assert!(request.zone.is_none());
    }

    #[test]
    fn grade_request_keeps_assessment_keys() {
        let raw = r#"{
            "student_id": "DU-2024-00001",
            "course_code": "CoSc2021",
            "academic_year": "2024/2025",
            "semester": 1,
            "assessments": {"FINAL_EXAM": 45, "Mid Exam": 18.5}
        }"#;

        let request: SubmitGradeRequest =
            serde_json::from_str(raw).expect("deserialize grade request");

        assert_eq!(request.assessments.get("FINAL_EXAM"), Some(&45.0));
        assert_eq!(request.assessments.get("Mid Exam"), Some(&18.5));
    }
}
