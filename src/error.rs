//! Error types for annotation extraction and report generation.
//!
//! This module defines all error types that can occur while reading an
//! annotation export and while rendering reports from it.

use std::path::PathBuf;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input file does not exist
    #[error("File not found at {}", .0.display())]
    FileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not valid JSON
    #[error("Could not decode JSON from {}: {source}", path.display())]
    InvalidJson {
        /// File the JSON was read from
        path: PathBuf,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// JSON parsed but the top-level layout is not an annotation export
    #[error("JSON structure is not as expected: {0}")]
    UnexpectedShape(String),

    /// Content could not be laid out on a page
    #[error("Layout error: {0}")]
    Layout(String),

    /// A single book's document could not be produced
    #[error("Failed to render document for '{title}': {reason}")]
    Render {
        /// Book title of the failed document
        title: String,
        /// Reason for the failure
        reason: String,
    },
}

impl Error {
    /// Wrap this error as a render failure for the given book.
    pub fn for_book(self, title: &str) -> Self {
        match self {
            Error::Render { .. } => self,
            other => Error::Render {
                title: title.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
