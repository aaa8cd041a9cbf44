// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ridesafe_common::{ErrorBody, ErrorDetail};
use thiserror::Error;

use crate::auth::AuthError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Application error types with error codes
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(AuthError),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Storage(err) => AppError::Storage(err),
            other => AppError::Auth(other),
        }
    }
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::MissingFields) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::MissingFields) => "VAL_001",
            AppError::Validation(ValidationError::PasswordTooShort { .. }) => "VAL_002",
            AppError::Validation(ValidationError::PasswordMismatch) => "VAL_003",
            AppError::Auth(AuthError::MissingFields) => "VAL_001",
            AppError::Auth(_) => "AUTH_001",
            AppError::Unauthenticated => "AUTH_002",
            AppError::Storage(_) => "STORE_001",
        }
    }

    /// Get a message suitable for inline display under a form.
    /// User errors keep their wording; system failures degrade to a
    /// generic line.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::Auth(err) => err.to_string(),
            AppError::Unauthenticated => "Please sign in to continue.".to_string(),
            AppError::Storage(_) => "Unexpected error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.sanitized_message(),
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match.");

        let err = AppError::from(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = AppError::from(StorageError::Io(IoError::new(ErrorKind::NotFound, "gone")));
        assert!(err.to_string().contains("Storage error"));
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::from(ValidationError::MissingFields).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AuthError::MissingFields).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::from(StorageError::Io(IoError::new(ErrorKind::Other, "boom"))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_error_codes() {
        assert_eq!(AppError::from(ValidationError::MissingFields).error_code(), "VAL_001");
        assert_eq!(
            AppError::from(ValidationError::PasswordTooShort { min: 6 }).error_code(),
            "VAL_002"
        );
        assert_eq!(AppError::from(ValidationError::PasswordMismatch).error_code(), "VAL_003");
        assert_eq!(AppError::from(AuthError::InvalidCredentials).error_code(), "AUTH_001");
        assert_eq!(AppError::Unauthenticated.error_code(), "AUTH_002");
        assert_eq!(
            AppError::from(StorageError::Io(IoError::new(ErrorKind::Other, "boom"))).error_code(),
            "STORE_001"
        );
    }

    #[test]
    fn test_storage_failure_inside_auth_is_unwrapped() {
        let err = AppError::from(AuthError::Storage(StorageError::Io(IoError::new(
            ErrorKind::PermissionDenied,
            "read-only",
        ))));
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(err.sanitized_message(), "Unexpected error");
    }

    #[tokio::test]
    async fn test_error_serialization() {
        let response = AppError::from(ValidationError::PasswordTooShort { min: 6 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.contains("application/json"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "VAL_002");
        assert_eq!(body.error.message, "Password must be at least 6 characters.");
    }
}
