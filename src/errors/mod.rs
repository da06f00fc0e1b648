//! Error handling utilities for the jupdate application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use thiserror::Error;

/// Represents specific error cases that can occur during database operations.
///
/// This enum provides detailed, contextual error information for different failure modes
/// when interacting with the SQLite journal database.
///
/// # Examples
///
/// ```
/// use jupdate::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("Entry with id 123 not found".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}\n\nIf you're seeing 'file is not a database' errors, the journal file may be corrupted or was written by an incompatible application.")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other jupdate instances.")]
    Pool(#[from] r2d2::Error),

    /// Requested row not found in database.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A schema migration step failed.
    #[error("Migration {version} ({description}) failed: {source}")]
    Migration {
        /// Version number of the failing step
        version: i32,
        /// Human-readable description of the step
        description: &'static str,
        /// The underlying SQLite error
        #[source]
        source: rusqlite::Error,
    },

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Represents errors raised by the PIN gate.
///
/// # Examples
///
/// ```
/// use jupdate::errors::AuthError;
///
/// let error = AuthError::Locked;
/// assert!(format!("{}", error).contains("locked"));
/// ```
#[derive(Debug, Error)]
pub enum AuthError {
    /// A PIN is configured and the session has not been unlocked.
    #[error("Journal is locked. Unlock it with your PIN (or set JUPDATE_PIN for non-interactive use).")]
    Locked,

    /// An empty PIN was supplied where a PIN is required.
    #[error("PIN cannot be empty")]
    EmptyPin,

    /// The PIN and its confirmation differ.
    #[error("PINs do not match. Please try again.")]
    PinMismatch,

    /// The supplied PIN does not match the stored hash.
    #[error("Incorrect PIN")]
    InvalidPin,

    /// A PIN check was requested but no PIN is configured.
    #[error("No PIN is set")]
    NoPinSet,

    /// Reading the PIN from the terminal failed.
    #[error("Failed to read PIN: {0}")]
    PinPrompt(String),
}

/// Represents all possible errors that can occur in the jupdate application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use jupdate::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use jupdate::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (invalid dates, unknown moods, empty content).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors related to PIN handling and session access.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(DatabaseError::Sqlite(err))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use jupdate::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
