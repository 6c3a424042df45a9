//! Core error types for studyplan-core.
//!
//! The resolver and the allocator never fail; errors only come from the
//! layers around them: loading timetables, configuration and exam storage.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Timetable loading errors
    #[error("Timetable error: {0}")]
    Timetable(#[from] TimetableError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors raised while building a timetable from a file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimetableError {
    /// Time is not "H:MM" on a 24-hour clock
    #[error("invalid time of day '{0}', expected H:MM")]
    InvalidTime(String),

    /// Weekday key could not be parsed
    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),

    /// Lesson keyed under a slot the timetable does not declare
    #[error("lesson on {weekday} is keyed under undeclared slot '{slot}'")]
    UnknownSlot { weekday: String, slot: String },

    /// Lesson ends at or before it starts
    #[error("lesson '{subject}' on {weekday} ends ({end}) before it starts ({start})")]
    EmptyInterval {
        weekday: String,
        subject: String,
        start: String,
        end: String,
    },

    /// Lesson keyed under a slot other than its own start time
    #[error("lesson '{subject}' on {weekday} starts at {start} but is keyed under slot '{slot}'")]
    StartMismatch {
        weekday: String,
        subject: String,
        slot: String,
        start: String,
    },

    /// Same weekday spelled under more than one key, e.g. `mon` and `monday`
    #[error("weekday {weekday} appears under both '{first}' and '{second}'")]
    DuplicateWeekday {
        weekday: String,
        first: String,
        second: String,
    },

    /// Slot list is not strictly increasing
    #[error("slots must be strictly ascending, '{0}' is out of order")]
    SlotsNotAscending(String),

    /// TOML syntax or shape error
    #[error("failed to parse timetable: {0}")]
    Parse(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Date is not YYYY-MM-DD
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Subject name is blank
    #[error("Subject must not be empty")]
    EmptySubject,
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                DatabaseError::Locked
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

impl From<toml::de::Error> for TimetableError {
    fn from(err: toml::de::Error) -> Self {
        TimetableError::Parse(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_sqlite_maps_to_locked() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(matches!(DatabaseError::from(err), DatabaseError::Locked));
    }

    #[test]
    fn other_sqlite_errors_map_to_query_failed() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(
            DatabaseError::from(err),
            DatabaseError::QueryFailed(_)
        ));
    }

    #[test]
    fn timetable_error_wraps_into_core_error() {
        let err: CoreError = TimetableError::InvalidTime("25:00".into()).into();
        assert_eq!(
            err.to_string(),
            "Timetable error: invalid time of day '25:00', expected H:MM"
        );
    }
}
