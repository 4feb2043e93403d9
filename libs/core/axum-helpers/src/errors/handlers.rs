use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::ErrorResponse;

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::with_message(
        "not found",
        "The requested resource was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
