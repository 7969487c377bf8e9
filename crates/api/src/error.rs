//! Maps `AppError` onto HTTP responses.
//!
//! Repository errors convert into [`AppError`] and every route funnels
//! failures through [`respond`], so the status code and error code
//! mapping lives in one place.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use lingua_shared::AppError;

/// Renders an error as a JSON response envelope.
///
/// Server-side failures are logged and their detail replaced with a
/// generic message; client errors keep their detail so the caller can
/// correct the request.
pub fn respond(error: &AppError) -> Response {
    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if status.is_server_error() {
        error!(error = %error, "Request failed");
        "An error occurred".to_string()
    } else {
        error.message().to_string()
    };

    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_their_detail() {
        let response = respond(&AppError::Validation("Amount must not be negative".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = respond(&AppError::NotFound("Customer not found".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = respond(&AppError::Conflict("Phone number taken".into()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_server_errors_hide_their_detail() {
        let response = respond(&AppError::Database("connection refused".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_validation_envelope_carries_code_and_message() {
        let response = respond(&AppError::Validation("Grade must be between 0 and 100".into()));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Grade must be between 0 and 100");
    }
}
