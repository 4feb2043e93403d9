pub mod handlers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Wire code for requests without a valid session.
pub const CODE_UNAUTHORIZED: &str = "unauthorized";

/// Wire code for failed validation and for lookups that miss, whether the id
/// is unknown or belongs to another user. One coarse code for both cases so
/// responses never reveal whether a resource exists.
pub const CODE_INVALID_DATA: &str = "invalid income data";

/// Wire code for unexpected store/infrastructure failures.
pub const CODE_INTERNAL: &str = "internal server error";

/// Standard error response body.
///
/// The domain taxonomy (unauthorized, invalid income data) is serialized as
/// a bare `{"code": "..."}` object; supplementary errors may carry a
/// human-readable `message`.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Optional human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            message: None,
        }
    }

    pub fn with_message(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: Some(message.into()),
        }
    }
}

/// Application error type that converts to HTTP responses with the API's
/// wire codes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// No valid session; terminates the request before handler logic runs
    #[error("unauthorized")]
    Unauthorized,

    /// Missing/invalid fields, or a lookup that missed (including ownership
    /// mismatches, indistinguishably)
    #[error("invalid income data")]
    InvalidData,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Unexpected store/infrastructure failure; details are logged, never
    /// returned to the client
    #[error("internal server error: {0}")]
    Internal(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized => {
                tracing::debug!("Rejected unauthenticated request");
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::code(CODE_UNAUTHORIZED),
                )
            }
            AppError::InvalidData => {
                tracing::info!("Invalid income data");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::code(CODE_INVALID_DATA),
                )
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::with_message("not found", msg),
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::with_message("conflict", msg),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::code(CODE_INTERNAL),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::with_message("service unavailable", msg),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unauthorized_wire_shape() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "code": "unauthorized" }));
    }

    #[tokio::test]
    async fn invalid_data_wire_shape() {
        let response = AppError::InvalidData.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "code": "invalid income data" }));
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = AppError::Internal("connection pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "code": "internal server error" }));
    }

    #[tokio::test]
    async fn conflict_carries_message() {
        let response = AppError::Conflict("email taken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["message"], "email taken");
    }
}
