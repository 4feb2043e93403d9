use axum_helpers::AppError;
use thiserror::Error;

pub type UserResult<T> = Result<T, UserError>;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<mongodb::error::Error>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<mongodb::bson::oid::Error> for UserError {
    fn from(err: mongodb::bson::oid::Error) -> Self {
        Self::Database {
            message: format!("Invalid ObjectId: {}", err),
            source: None,
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail(email) => {
                AppError::Conflict(format!("email '{}' already registered", email))
            }
            // Same wire shape as the session guard: no hint about whether
            // the email exists or the password was wrong
            UserError::InvalidCredentials => AppError::Unauthorized,
            UserError::NotFound => AppError::NotFound("user not found".to_string()),
            UserError::PasswordHash(message) => AppError::Internal(message),
            UserError::Database { message, .. } => AppError::Internal(message),
            UserError::Internal(message) => AppError::Internal(message),
        }
    }
}

impl axum::response::IntoResponse for UserError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
