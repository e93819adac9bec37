use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("No such product: {0}")]
    NoSuchProductId(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for every error caused by caller-supplied data.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest(_)
                | AppError::InvalidId(_)
                | AppError::UserNotFound(_)
                | AppError::NoSuchProductId(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            _ if self.is_bad_request() => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let message = status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string();
        let body = ApiResponse {
            message,
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Unique or foreign-key violations reported by the store.
pub fn is_constraint_violation(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_belong_to_the_bad_request_family() {
        assert_eq!(
            AppError::InvalidId("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UserNotFound("a@b.c".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NoSuchProductId("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_failures_are_internal_and_keep_the_message() {
        let err = AppError::from(DbErr::Custom("disk full".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_bad_request());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn custom_store_errors_are_not_constraint_violations() {
        assert!(!is_constraint_violation(&DbErr::Custom("boom".into())));
    }

    #[test]
    fn auth_failures_map_to_their_status() {
        assert_eq!(
            AppError::Unauthorized("missing".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }
}
