use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use registrar_core::RegistrarError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "CRC32 hash must be 8 hex characters, got 7")]
    pub message: String,
    /// Request field the error refers to, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "hashes.crc32")]
    pub field: Option<&'static str>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation {
        field: Option<&'static str>,
        message: String,
    },
    NotFound {
        field: Option<&'static str>,
        message: String,
    },
    /// The request was cancelled or ran past its deadline.
    Unavailable(String),
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            field: None,
            message: message.into(),
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message,
                    field,
                },
            ),
            AppError::NotFound { field, message } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message,
                    field,
                },
            ),
            AppError::Unavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    code: "UNAVAILABLE",
                    message,
                    field: None,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        field: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<RegistrarError> for AppError {
    fn from(err: RegistrarError) -> Self {
        let field = err.field();
        match err {
            RegistrarError::UnknownFile(_) | RegistrarError::UnknownFolderRoot(_) => {
                AppError::NotFound {
                    field,
                    message: err.to_string(),
                }
            }
            RegistrarError::Cancelled | RegistrarError::DeadlineExceeded => {
                tracing::warn!("Registration aborted: {err}");
                AppError::Unavailable(err.to_string())
            }
            RegistrarError::Repository(e) => AppError::Internal(e.to_string()),
            other => AppError::Validation {
                field,
                message: other.to_string(),
            },
        }
    }
}
