//! Error types for the upload cycle

use thiserror::Error;

use crate::models::{StatusMessage, NO_FILE_TEXT};

/// The network call could not complete
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Reasons a submission did not succeed
///
/// The `Display` text is the bare failure message; [`UploadError::status_message`]
/// turns it into what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No file was picked; never reaches the network
    #[error("Please select a file first")]
    NoFileSelected,

    /// Request could not be sent or no response arrived
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Endpoint answered with a non-success status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Response body was not JSON
    #[error("{0}")]
    Parse(String),
}

impl UploadError {
    /// Short tag for logs
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::NoFileSelected => "validation",
            UploadError::Transport(_) => "transport",
            UploadError::Server { .. } => "server",
            UploadError::Parse(_) => "parse",
        }
    }

    /// Message shown to the user for this failure
    pub fn status_message(&self) -> StatusMessage {
        match self {
            UploadError::NoFileSelected => StatusMessage::error(NO_FILE_TEXT),
            other => StatusMessage::error(format!("Error: {}", other)),
        }
    }
}
