//! HTTP mapping of service failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use registrar_api_types::{ErrorResponse, FieldMessage};
use registrar_core::domain::DomainError;
use tracing::{error, warn};

use crate::error::ServiceError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    message: String,
    code: &'static str,
    status: StatusCode,
    fields: Vec<FieldMessage>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            status,
            fields: Vec::new(),
        }
    }

    fn with_field(mut self, field: &str, message: impl Into<String>) -> Self {
        self.fields.push(FieldMessage {
            field: field.to_string(),
            message: message.into(),
        });
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = StatusCode::UNPROCESSABLE_ENTITY;
        match err {
            DomainError::InvalidFields(fields) => {
                let mut api = ApiError::new(status, "VALIDATION_FAILED", "please correct the highlighted fields");
                for field in fields.iter() {
                    api = api.with_field(field.field, field.message.clone());
                }
                api
            }
            DomainError::CreditLimitExceeded { .. } => {
                ApiError::new(status, "CREDIT_LIMIT_EXCEEDED", err.to_string())
            }
            DomainError::EmptySelection => ApiError::new(status, "EMPTY_SELECTION", err.to_string()),
            DomainError::UnknownCourse(_) => ApiError::new(status, "UNKNOWN_COURSE", err.to_string()),
            other => ApiError::new(status, "INVALID_REQUEST", other.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(err) => err.into(),
            ServiceError::NotFound { .. } => {
                ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            ServiceError::NotRegistered { .. } => {
                ApiError::new(StatusCode::CONFLICT, "NOT_REGISTERED", err.to_string())
            }
            ServiceError::Conflict { field, message } => {
                ApiError::new(StatusCode::CONFLICT, "CONFLICT", message.clone())
                    .with_field(field, message)
            }
            ServiceError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", err.to_string())
            }
            ServiceError::Unavailable(source) => {
                warn!(error = ?source, "database unavailable");
                ApiError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "DATABASE_UNAVAILABLE",
                    "the database is unavailable, please try again",
                )
            }
            ServiceError::Internal(source) => {
                error!(error = ?source, "request failed");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            code: self.code.to_string(),
            message: self.message,
            fields: self.fields,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use crate::error::ServiceError;
    use axum::http::StatusCode;
    use registrar_core::domain::{DomainError, FieldErrors};

    #[test]
    fn field_errors_become_unprocessable_with_fields() {
        let mut fields = FieldErrors::new();
        fields.push("email", "Invalid email format");
        fields.push("username", "Username must be at least 4 characters");

        let api = ApiError::from(ServiceError::from(DomainError::InvalidFields(fields)));

        assert_eq!(api.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.fields.len(), 2);
        assert_eq!(api.fields[0].field, "email");
    }

    #[test]
    fn conflicts_name_the_field() {
        let api = ApiError::from(ServiceError::conflict("username", "Username already exists"));

        assert_eq!(api.status(), StatusCode::CONFLICT);
        assert_eq!(api.fields[0].field, "username");
        assert_eq!(api.message, "Username already exists");
    }

    #[test]
    fn internal_errors_hide_the_detail() {
        let api = ApiError::from(ServiceError::Internal(anyhow::anyhow!(
            "UNIQUE constraint failed: secret_table"
        )));

        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "internal server error");
    }
}
