//! Error types for OpenPools.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using OpenPools' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for OpenPools operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(Uuid),

    /// Stored keyword profile could not be decoded
    #[error("Malformed keyword profile for {user_id}: {reason}")]
    MalformedProfile { user_id: Uuid, reason: String },

    /// Keyword extraction failed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Writing computed results failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Generic message safe to show end users.
    ///
    /// Store and network details stay in the logs; callers surface only
    /// this string.
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::ProfileNotFound(_) | Error::NotFound(_) => "profile not found",
            Error::InvalidInput(_) => "invalid request",
            Error::Extraction(_) => "failed to extract keywords",
            Error::Persistence(_) => "failed to save results",
            Error::Database(_)
            | Error::MalformedProfile { .. }
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::Request(_)
            | Error::Internal(_) => "failed to compute matches",
        }
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Database(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            Error::Request(_) => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
