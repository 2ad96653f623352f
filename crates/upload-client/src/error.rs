//! Error types for upload client operations

use thiserror::Error;
use upload_core::TransportError;

/// Result type alias for upload client operations
pub type Result<T> = std::result::Result<T, UploadClientError>;

/// Errors that can occur during upload client operations
#[derive(Error, Debug)]
pub enum UploadClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Server returned an error response
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

impl UploadClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }
}

impl From<UploadClientError> for TransportError {
    fn from(err: UploadClientError) -> Self {
        match err {
            // reqwest's own text, without our prefix
            UploadClientError::HttpError(e) => TransportError::new(e.to_string()),
            other => TransportError::new(other.to_string()),
        }
    }
}
