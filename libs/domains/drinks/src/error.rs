//! Drink domain error types

use thiserror::Error;

/// Result type for drink operations
pub type Result<T> = std::result::Result<T, DrinkError>;

/// Drink domain errors
#[derive(Debug, Error)]
pub enum DrinkError {
    /// MongoDB error
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<mongodb::error::Error>,
    },
}

impl From<mongodb::error::Error> for DrinkError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
