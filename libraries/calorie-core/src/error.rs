/// Core error types for the calorie tracker
use thiserror::Error;

/// Result type alias using `CalorieError`
pub type Result<T> = std::result::Result<T, CalorieError>;

/// Core error type for the calorie tracker
#[derive(Error, Debug)]
pub enum CalorieError {
    /// User not found by username
    #[error("cannot find user with username: {0}")]
    UserNotFound(String),

    /// Username already taken by another account
    #[error("an account with username {0} already exists")]
    DuplicateUsername(String),

    /// Date path parameter could not be parsed into an epoch key
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// No daily log exists for the given epoch-millisecond key
    #[error("no meal log for date: {0}")]
    LogNotFound(i64),

    /// No meal entry with the given id in the daily log
    #[error("cannot find food item with id: {0}")]
    EntryNotFound(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CalorieError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
