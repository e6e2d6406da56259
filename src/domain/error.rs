//! Error types for the image search and bookmark layer.
//!
//! This module defines the centralized error type [`SearchImagesError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for image search and bookmark operations.
///
/// This enum consolidates all error conditions that can occur, from storage
/// operations to HTTP failures and configuration issues. Variants wrapping
/// errors from external crates use `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use search_images::SearchImagesError;
///
/// fn validate_page(page: u32) -> Result<(), SearchImagesError> {
///     if page == 0 {
///         return Err(SearchImagesError::Api("page must start at 1".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum SearchImagesError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the image store fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The image search API rejected the request or answered with an error status.
    #[error("API error: {0}")]
    Api(String),

    /// The HTTP transport failed before a response could be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A continuous image stream reported a failure.
    #[error("Stream error: {0}")]
    Stream(String),
}

/// A specialized `Result` type for this crate.
///
/// Alias for `std::result::Result<T, SearchImagesError>`.
pub type Result<T> = std::result::Result<T, SearchImagesError>;
