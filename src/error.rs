//! Error types for PowerSearch
//!
//! None of these are fatal: a failed extraction degrades to "no query
//! detected" and a failed mutation leaves the registry untouched.

use thiserror::Error;

/// Errors produced by the registry, the extractor and the storage layer
#[derive(Debug, Error)]
pub enum Error {
    /// The page URL could not be parsed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A custom engine failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Update or delete of a custom engine index that does not exist
    #[error("No custom engine at index {index} ({len} defined)")]
    NotFound { index: usize, len: usize },

    /// Malformed percent-encoding in a matched query parameter
    #[error("Malformed encoding in query parameter '{param}'")]
    Decode { param: String },

    /// Switching was requested but the page carries no search query
    #[error("No search query detected on the current page")]
    NoQuery,

    /// No switch target with the requested name
    #[error("Unknown search engine: {0}")]
    UnknownTarget(String),

    /// A switch target has an empty URL template
    #[error("Search engine '{0}' has no URL template")]
    InvalidTemplate(String),

    /// Store-level failure that is not an I/O or JSON error
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a custom engine is rejected on add or update
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty after trimming
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// Another custom engine already uses this name
    #[error("A custom engine named '{0}' already exists")]
    DuplicateName(String),

    /// Another custom engine already uses this domain
    #[error("A custom engine for domain '{0}' already exists")]
    DuplicateDomain(String),
}

/// Result type alias for PowerSearch operations
pub type Result<T> = std::result::Result<T, Error>;
