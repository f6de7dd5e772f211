//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use fleetpulse_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details, e.g. per-field validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// `AppError` carried across the HTTP boundary.
///
/// `IntoResponse` and `AppError` are both foreign to this crate, so the
/// mapping lives on this wrapper; handlers return it and `?` converts
/// through `From`.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Convert validator failures into a `Validation` error carrying the
/// per-field messages as details.
pub fn validation_failed(
    message: impl Into<String>,
    errors: validator::ValidationErrors,
) -> AppError {
    let details = serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null);
    AppError::validation(message).with_details(details)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Storage
            | ErrorKind::Process
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(error = %err.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        // Internal detail never leaves the server.
        let details = match &err.kind {
            ErrorKind::Validation => err.details.clone(),
            _ => None,
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message.clone(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_of(err: AppError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn kinds_map_to_their_status_codes() {
        assert_eq!(status_of(AppError::not_found("gone")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::conflict("busy")), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::validation("bad")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::storage("disk full")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::internal("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn validation_responses_carry_field_details() {
        let err = AppError::validation("Invalid payload")
            .with_details(json!({"busId": ["must not be empty"]}));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["busId"][0], "must not be empty");
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let err = AppError::storage("write failed").with_details(json!({"path": "/secret"}));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert!(body.get("details").is_none());
    }
}
