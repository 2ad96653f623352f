//! Host seams the controller is wired to
//!
//! A host (browser binding, terminal, test harness) provides the form, its
//! file input, the status element and the network transport.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::models::{SelectedFile, StatusMessage, UploadRequest, UploadResponse};

/// The upload form itself
pub trait UploadForm: Send + Sync {
    /// Clear all fields, including the chosen file
    fn reset(&self);
}

/// File picker inside the form
pub trait FileInput: Send + Sync {
    /// Files currently selected; empty when nothing was picked
    fn selected_files(&self) -> Vec<SelectedFile>;
}

/// Element that displays status messages
pub trait StatusSink: Send + Sync {
    /// Show `message`, replacing whatever is displayed
    fn render(&self, message: &StatusMessage);

    /// Empty the displayed text
    fn clear(&self);
}

/// Sends one upload request
///
/// Browser futures are not `Send`, so on wasm32 the returned future is not
/// required to be either.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait UploadTransport: Send + Sync {
    /// Post `request` and return the raw reply for any HTTP status.
    ///
    /// Only failures to complete the call are errors.
    async fn send(&self, request: UploadRequest) -> Result<UploadResponse, TransportError>;
}
