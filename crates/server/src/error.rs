use registrar_core::domain::{DomainError, Term};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("student {student_id} is not registered for {course_code} in {term}")]
    NotRegistered {
        student_id: String,
        course_code: String,
        term: Term,
    },

    #[error("{message}")]
    Conflict { field: &'static str, message: String },

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("database is unavailable")]
    Unavailable(#[source] anyhow::Error),

    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(field: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            field,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        // Rules re-checked inside a repository transaction surface as domain errors.
        let err = match err.downcast::<DomainError>() {
            Ok(domain) => return Self::Domain(domain),
            Err(err) => err,
        };

        if is_connectivity_error(&err) {
            Self::Unavailable(err)
        } else {
            Self::Internal(err)
        }
    }
}

fn db_error(err: &anyhow::Error) -> Option<&DbErr> {
    err.chain().find_map(|cause| cause.downcast_ref::<DbErr>())
}

pub fn is_connectivity_error(err: &anyhow::Error) -> bool {
    matches!(
        db_error(err),
        Some(DbErr::ConnectionAcquire(_) | DbErr::Conn(_))
    )
}

/// Detail of a unique constraint violation, if that is what failed.
pub fn unique_violation(err: &anyhow::Error) -> Option<String> {
    match db_error(err)?.sql_err()? {
        SqlErr::UniqueConstraintViolation(detail) => Some(detail),
        _ => None,
    }
}
