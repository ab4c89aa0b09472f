//! Login and account registration routes.

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::{Local, NaiveDate};
use registrar_api_types::{
    CreateAccountRequest, CreateAccountResponse, LoginRequest, LoginResponse,
};
use registrar_core::domain::{AccountForm, DeanType, FieldErrors, Gender, ProfileForm, Role};

use super::error::ApiError;
use super::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/accounts", post(create_account))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let role: Role = request.role.parse()?;
    let session = state
        .accounts
        .login(&request.username, &request.password, role)
        .await?;

    Ok(Json(LoginResponse {
        user_id: session.user.id.to_string(),
        username: session.user.username,
        full_name: session.user.full_name,
        role: session.user.role.to_string(),
        business_id: session.business_id,
    }))
}

/// Registers a student, teacher, dean or admin account.
async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), ApiError> {
    let form = account_form(request)?;
    let created = state
        .accounts
        .register(form, Local::now().date_naive())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAccountResponse {
            user_id: created.user.id.to_string(),
            role: created.user.role.to_string(),
            business_id: created.business_id,
        }),
    ))
}

fn account_form(request: CreateAccountRequest) -> Result<AccountForm, ApiError> {
    let role: Role = request.role.parse()?;

    let mut errors = FieldErrors::new();
    let gender = parse_field(
        &mut errors,
        "gender",
        request.gender.as_deref(),
        parse_gender,
        "Gender must be Male or Female",
    );
    let date_of_birth = parse_field(
        &mut errors,
        "date_of_birth",
        request.date_of_birth.as_deref(),
        parse_date,
        "Date of birth must be YYYY-MM-DD",
    );
    let appointment_date = parse_field(
        &mut errors,
        "appointment_date",
        request.appointment_date.as_deref(),
        parse_date,
        "Appointment date must be YYYY-MM-DD",
    );
    let dean_type = parse_field(
        &mut errors,
        "dean_type",
        request.dean_type.as_deref(),
        parse_dean_type,
        "Dean type must be Department Dean or College Dean",
    );
    errors.into_result()?;

    let profile = match role {
        Role::Student => ProfileForm::Student {
            registration_number: request.registration_number.unwrap_or_default(),
            academic_year: request.academic_year,
            department: request.department,
        },
        Role::Teacher => ProfileForm::Teacher {
            employee_id: request.employee_id.unwrap_or_default(),
            department: request.department,
            qualification: request.qualification.unwrap_or_default(),
        },
        Role::Dean => ProfileForm::Dean {
            department: request.department,
            appointment_date,
            office_location: request.office_location.unwrap_or_default(),
            dean_type,
        },
        Role::Admin => ProfileForm::Admin,
    };

    Ok(AccountForm {
        first_name: request.first_name,
        last_name: request.last_name,
        gender,
        phone: request.phone,
        date_of_birth,
        region: request.region,
        zone: request.zone,
        email: request.email,
        username: request.username,
        password: request.password,
        confirm_password: request.confirm_password,
        profile,
    })
}

/// Blank input is left to form validation; unreadable input is a field error.
fn parse_field<T>(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
    message: &str,
) -> Option<T> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
    let parsed = parse(raw);
    if parsed.is_none() {
        errors.push(field, message);
    }
    parsed
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn parse_gender(raw: &str) -> Option<Gender> {
    match raw.to_ascii_lowercase().as_str() {
        "male" | "m" => Some(Gender::Male),
        "female" | "f" => Some(Gender::Female),
        _ => None,
    }
}

fn parse_dean_type(raw: &str) -> Option<DeanType> {
    match raw.to_ascii_lowercase().as_str() {
        "department" | "department dean" => Some(DeanType::Department),
        "college" | "college dean" => Some(DeanType::College),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher_request() -> CreateAccountRequest {
        CreateAccountRequest {
            role: "Teacher".to_string(),
            first_name: "Abebe".to_string(),
            last_name: "Kebede".to_string(),
            gender: Some("male".to_string()),
            phone: "0911223344".to_string(),
            date_of_birth: Some("1985-04-12".to_string()),
            region: Some("Sidama".to_string()),
            email: "abebe@dilla.edu.et".to_string(),
            username: "abebe".to_string(),
            password: "password1".to_string(),
            confirm_password: "password1".to_string(),
            employee_id: Some("EMP-77".to_string()),
            department: Some("Computer Science".to_string()),
            qualification: Some("MSc".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn request_maps_to_a_teacher_form() {
        let form = account_form(teacher_request()).expect("form");

        assert_eq!(form.gender, Some(Gender::Male));
        assert_eq!(form.date_of_birth, NaiveDate::from_ymd_opt(1985, 4, 12));
        assert!(matches!(
            form.profile,
            ProfileForm::Teacher { ref employee_id, .. } if employee_id == "EMP-77"
        ));
    }

    #[test]
    fn unreadable_dates_are_field_errors() {
        let request = CreateAccountRequest {
            date_of_birth: Some("12/04/1985".to_string()),
            ..teacher_request()
        };

        let err = account_form(request).expect_err("bad date");

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn dean_type_accepts_both_spellings() {
        assert_eq!(parse_dean_type("College Dean"), Some(DeanType::College));
        assert_eq!(parse_dean_type("department"), Some(DeanType::Department));
        assert_eq!(parse_dean_type("provost"), None);
    }
}
