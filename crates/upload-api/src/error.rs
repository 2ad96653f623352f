//! API error types and conversions

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("{0}")]
    BadRequest(String),
    /// 413 Payload Too Large
    #[error("{0}")]
    PayloadTooLarge(String),
    /// 422 Unprocessable Entity (missing or invalid form field)
    #[error("{0}")]
    Unprocessable(String),
    /// Rejection with a status chosen by the extractor
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    /// 500 Internal Server Error
    #[error("{0}")]
    Internal(String),
}

/// Error body read by the upload form
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %detail, "API error");
        } else {
            tracing::debug!(status = status.as_u16(), %detail, "API client error");
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("File too large".to_string())
        } else if status.is_server_error() {
            ApiError::Internal(err.body_text())
        } else {
            ApiError::Rejected {
                status,
                message: err.body_text(),
            }
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::PayloadTooLarge("x".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::Unprocessable("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Rejected {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                message: "x".into()
            }
            .status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
