// ABOUTME: Preference store error types
// ABOUTME: Validation failures and non-fatal persistence failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Item id cannot be empty")]
    EmptyId,

    #[error("Preference storage unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("Stored preferences are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<std::io::Error> for PreferenceError {
    fn from(err: std::io::Error) -> Self {
        PreferenceError::PersistenceUnavailable(err.to_string())
    }
}
