//! Event domain error types

use axum_helpers::AppError;
use thiserror::Error;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Event domain errors
#[derive(Debug, Error)]
pub enum EventError {
    /// Failed validation, or a lookup/delete that matched nothing. One
    /// variant for both so a wrong id and another user's id are
    /// indistinguishable on the wire.
    #[error("invalid income data")]
    InvalidData,

    /// MongoDB error. Malformed ObjectIds land here too and surface through
    /// the generic 500 path.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<mongodb::error::Error>,
    },
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<mongodb::bson::oid::Error> for EventError {
    fn from(err: mongodb::bson::oid::Error) -> Self {
        Self::Database {
            message: format!("Invalid ObjectId: {}", err),
            source: None,
        }
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Database {
            message: format!("BSON serialization error: {}", err),
            source: None,
        }
    }
}

impl From<mongodb::bson::de::Error> for EventError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::Database {
            message: format!("BSON deserialization error: {}", err),
            source: None,
        }
    }
}

impl From<domain_drinks::DrinkError> for EventError {
    fn from(err: domain_drinks::DrinkError) -> Self {
        match err {
            domain_drinks::DrinkError::Database { message, source } => {
                Self::Database { message, source }
            }
        }
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::InvalidData => AppError::InvalidData,
            EventError::Database { message, .. } => AppError::Internal(message),
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
