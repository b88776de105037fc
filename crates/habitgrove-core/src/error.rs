//! Core error types for habitgrove-core.
//!
//! Each concern gets its own thiserror enum; [`CoreError`] collects them
//! so callers can use a single `Result` alias when crossing module lines.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitgrove-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Habit, streak and activity rule violations
    #[error(transparent)]
    Habit(#[from] HabitError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Text completion errors
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by tracker handlers.
///
/// A handler that returns one of these has not mutated any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HabitError {
    /// A second check-in for the same habit on the same calendar date.
    #[error("Already checked in for '{habit}' today ({date})")]
    AlreadyCheckedInToday {
        habit: String,
        date: chrono::NaiveDate,
    },

    /// The habit was never registered in the ledger.
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),

    /// The activity name is not one of the fixed daily activities.
    #[error("Unknown activity: {0}")]
    UnknownActivity(String),
}

impl HabitError {
    /// Whether the error is a user-facing notice rather than a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, HabitError::AlreadyCheckedInToday { .. })
    }
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored value could not be decoded
    #[error("Corrupt value under key '{key}': {message}")]
    CorruptValue { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not resolve the data directory
    #[error("Cannot resolve data directory: {0}")]
    DataDir(String),
}

/// Text completion failures. All of them are recoverable by the caller.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Transport-level failure (DNS, TLS, timeout, ...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response did not contain a completion
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// No API key available
    #[error("API key not configured (set ${env_var})")]
    MissingApiKey { env_var: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn already_checked_in_is_informational() {
        let err = HabitError::AlreadyCheckedInToday {
            habit: "Smoking".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert!(err.is_informational());
        assert!(!HabitError::UnknownHabit("Smoking".into()).is_informational());
        assert_eq!(
            err.to_string(),
            "Already checked in for 'Smoking' today (2024-03-01)"
        );
    }

    #[test]
    fn habit_error_is_transparent_inside_core_error() {
        let err: CoreError = HabitError::UnknownHabit("Vaping".into()).into();
        assert_eq!(err.to_string(), "Unknown habit: Vaping");
    }
}
