//! Data model for the upload cycle

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Name of the multipart part carrying the file
pub const FILE_FIELD: &str = "file";

/// Default endpoint path for uploads
pub const DEFAULT_ENDPOINT: &str = "/upload";

/// Shown when the form is submitted without a file
pub const NO_FILE_TEXT: &str = "Please select a file first";

/// Shown after the server accepted the upload
pub const SUCCESS_TEXT: &str = "File uploaded successfully!";

/// Failure message used when the server reply carries no `detail`
pub const FALLBACK_FAILURE_TEXT: &str = "Upload failed";

// =============================================================================
// Selected file
// =============================================================================

/// A file picked by the user
///
/// Created when the user picks a file, read once when the form is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the picker
    pub file_name: String,
    /// MIME type, if the host knows it
    pub content_type: Option<String>,
    /// File contents
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Attach a MIME type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

// =============================================================================
// Request / response
// =============================================================================

/// One upload attempt: a single file part posted to `endpoint`
///
/// Built fresh for every submission and dropped once the call settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Endpoint path, e.g. `/upload`
    pub endpoint: String,
    /// Multipart part name, always [`FILE_FIELD`]
    pub field_name: &'static str,
    /// The file to send
    pub file: SelectedFile,
}

impl UploadRequest {
    pub fn new(endpoint: impl Into<String>, file: SelectedFile) -> Self {
        Self {
            endpoint: endpoint.into(),
            field_name: FILE_FIELD,
            file,
        }
    }
}

/// Raw reply to an upload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, expected to be JSON for any status
    pub body: Bytes,
}

impl UploadResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// Status message
// =============================================================================

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    /// Presentation class applied to the message element
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "text-green-500 mt-4 text-center",
            Severity::Error => "text-red-500 mt-4 text-center",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short user-facing message with a severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// Whether an upload is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Pending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_file_field() {
        let request = UploadRequest::new("/upload", SelectedFile::new("a.txt", "abc"));
        assert_eq!(request.field_name, "file");
        assert_eq!(request.file.len(), 3);
    }

    #[test]
    fn test_success_range() {
        assert!(UploadResponse::new(200, "{}").is_success());
        assert!(UploadResponse::new(201, "{}").is_success());
        assert!(!UploadResponse::new(302, "{}").is_success());
        assert!(!UploadResponse::new(413, "{}").is_success());
    }

    #[test]
    fn test_severity_classes() {
        assert!(Severity::Error.css_class().starts_with("text-red-500"));
        assert!(Severity::Success.css_class().starts_with("text-green-500"));
        assert_eq!(
            serde_json::to_string(&Severity::Success).unwrap(),
            "\"success\""
        );
    }

    #[test]
    fn test_debug_hides_contents() {
        let file = SelectedFile::new("secret.bin", vec![1u8, 2, 3]);
        let debug = format!("{:?}", file);
        assert!(debug.contains("data_len: 3"));
        assert!(!debug.contains("[1, 2, 3]"));
    }
}
