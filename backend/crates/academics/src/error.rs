//! Academics Error Types
//!
//! This module provides store-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Academics-specific result type alias
pub type AcademicsResult<T> = Result<T, AcademicsError>;

/// Academics-specific error variants
#[derive(Debug, Error)]
pub enum AcademicsError {
    /// Request field validation failed
    #[error("{0}")]
    Validation(String),

    /// Unique value (code, email) already taken
    ///
    /// Reported as 400, matching the API contract for unique-constraint
    /// violations.
    #[error("Duplicate value for unique field: {0}")]
    Duplicate(&'static str),

    /// A referenced row does not exist
    #[error("Referenced {0} does not exist")]
    ForeignKey(&'static str),

    /// Delete rejected because dependent rows exist
    #[error("Cannot delete: {0} still reference this record")]
    HasDependents(&'static str),

    /// Entity not found
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AcademicsError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcademicsError::Validation(_) | AcademicsError::Duplicate(_) => ErrorKind::BadRequest,
            AcademicsError::ForeignKey(_) | AcademicsError::HasDependents(_) => ErrorKind::Conflict,
            AcademicsError::NotFound(_) => ErrorKind::NotFound,
            AcademicsError::Database(_) | AcademicsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AcademicsError::Database(e) => {
                tracing::error!(error = %e, "Academics database error");
            }
            AcademicsError::Internal(msg) => {
                tracing::error!(message = %msg, "Academics internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Academics error");
            }
        }
    }
}

impl From<AcademicsError> for AppError {
    fn from(err: AcademicsError) -> Self {
        match err {
            // Let the kernel classify driver errors (FK, unique, pool, ...)
            AcademicsError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for AcademicsError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            AcademicsError::Validation("bad".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            AcademicsError::Duplicate("course_code").kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            AcademicsError::ForeignKey("teacher").kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            AcademicsError::HasDependents("enrollments").kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            AcademicsError::NotFound("Student").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            AcademicsError::Internal("x".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_app_error_statuses() {
        let err: AppError = AcademicsError::NotFound("Course").into();
        assert_eq!(err.status_code(), 404);

        let err: AppError = AcademicsError::HasDependents("enrollments").into();
        assert_eq!(err.status_code(), 409);

        let err: AppError = AcademicsError::Duplicate("student_code").into();
        assert_eq!(err.status_code(), 400);
    }
}
