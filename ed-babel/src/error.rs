//! Error types for conversion operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an [`AssetStore`](crate::assets::AssetStore) implementation.
#[derive(Debug, Error)]
pub enum AssetError {
    /// HTTP transport error
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform answered, but not with something we understand
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No asset with this id exists in the store
    #[error("Asset '{0}' not found")]
    NotFound(String),

    /// The store has no API token and cannot upload
    #[error("Uploading requires an API token")]
    MissingToken,
}

/// Errors that can occur during a conversion call
#[derive(Debug, Error)]
pub enum FormatError {
    /// Malformed Markdown or Ed-XML input
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A Markdown image points at a local file that could not be read
    #[error("Failed to read image '{}': {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Uploading a Markdown image to the asset store failed
    #[error("Failed to upload image '{path}': {source}")]
    AssetUpload {
        path: String,
        #[source]
        source: AssetError,
    },
}
