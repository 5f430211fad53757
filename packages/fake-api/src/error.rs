use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::validation::FieldErrors;
use serde::Serialize;

/// Error payload in the shape the real API returns.
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum FakeError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    PermissionDenied,
    NotFound(String),
    /// A failure queued by the test through `FakeApi::fail_next`.
    Injected {
        status: u16,
        message: String,
    },
    Internal(String),
}

impl FakeError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            FakeError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            FakeError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication required".into(),
                },
            ),
            FakeError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid or expired token".into(),
                },
            ),
            FakeError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid email or password".into(),
                },
            ),
            FakeError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "PERMISSION_DENIED",
                    message: "Insufficient permissions".into(),
                },
            ),
            FakeError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            FakeError::Injected { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                ErrorBody {
                    code: "INJECTED",
                    message,
                },
            ),
            FakeError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: String::new(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for FakeError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<FieldErrors> for FakeError {
    fn from(errors: FieldErrors) -> Self {
        FakeError::Validation(errors.to_string())
    }
}

impl From<serde_json::Error> for FakeError {
    fn from(err: serde_json::Error) -> Self {
        FakeError::Validation(err.to_string())
    }
}
