//! Error types for the content pipeline
//!
//! None of these cross the public `process_content` / `sanitize` boundary:
//! every variant is caught there and turned into the plain-paragraph fallback.

use thiserror::Error;

/// Result type alias for fallible pipeline stages
pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Input exceeds `MAX_HTML_SIZE`
    #[error("HTML input too large: {size} bytes (maximum allowed: {limit} bytes)")]
    TooLarge { size: usize, limit: usize },

    /// The DOM could not be walked back into markup
    #[error("Malformed content: {0}")]
    Malformed(String),
}
