//! Error types for the notepane plugin.
//!
//! This module defines the centralized error type [`NotesError`] and a type alias
//! [`Result`] used across the plugin. All errors derive their `Error`
//! implementation from `thiserror`.
//!
//! Only one error kind ever reaches the screen ("query failed"); the variants
//! below exist so that logs say which layer actually broke.

use thiserror::Error;

/// The main error type for notepane operations.
///
/// # Examples
///
/// ```
/// use notepane::NotesError;
///
/// fn validate_page(page: u32) -> Result<(), NotesError> {
///     if page == 0 {
///         return Err(NotesError::Config("page must be at least 1".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum NotesError {
    /// The notes API answered with a non-success status code.
    #[error("API request failed with status {status}")]
    Http {
        /// HTTP status code returned by the API.
        status: u16,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Malformed API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request never produced a response (host refused it, permission
    /// missing, connection dropped).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The configured API URL could not be parsed.
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    /// A note draft failed validation before submission.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for notepane operations.
pub type Result<T> = std::result::Result<T, NotesError>;
