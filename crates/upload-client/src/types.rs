//! Wire types for the upload endpoint

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Stored file name
    pub file: String,
    /// Bytes received
    #[serde(default)]
    pub size: usize,
}
