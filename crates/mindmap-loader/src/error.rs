//! Loader error types

use thiserror::Error;

/// Errors that can occur while turning a source into text
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// No extractor accepts this kind of content
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file claims a supported format but its contents are malformed
    #[error("Unreadable file {name}: {reason}")]
    Unreadable {
        /// File name or description of the source
        name: String,
        /// What went wrong
        reason: String,
    },

    /// Extraction succeeded but produced no text
    #[error("No text content in {0}")]
    Empty(String),
}
