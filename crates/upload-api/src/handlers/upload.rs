//! Single-file upload handler

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use upload_core::FILE_FIELD;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Response for a successful upload
#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    /// File name sent by the client
    pub file: String,
    /// Size of the uploaded data
    pub size: usize,
}

/// Upper-cased text after the last `.`, or the whole name when it has none
pub fn file_type(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}

fn check_file_type(config: &ServerConfig, file_name: &str) -> Result<(), ApiError> {
    let file_type = file_type(file_name);
    if config.accepts(&file_type) {
        return Ok(());
    }

    let message = match file_type.as_str() {
        "TXT" | "CSV" => format!("{} file support is currently disabled", file_type),
        _ => format!(
            "Unsupported file type: {}. Currently supported types: {}",
            file_type,
            config
                .accepted_types
                .iter()
                .map(|t| t.trim_start_matches('.').to_ascii_uppercase())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    Err(ApiError::BadRequest(message))
}

/// POST /upload
/// Accept the first multipart part named `file`
///
/// Other parts are skipped. Files whose extension is not in
/// `accepted_types` are refused with 400. The data is counted and dropped.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadFileResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        check_file_type(state.config(), &file_name)?;
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        if data.len() > state.config().max_upload_bytes {
            tracing::debug!(
                file_name = %file_name,
                size = data.len(),
                limit = state.config().max_upload_bytes,
                "Upload over size limit"
            );
            return Err(ApiError::PayloadTooLarge("File too large".to_string()));
        }

        tracing::info!(
            file_name = %file_name,
            content_type = content_type.as_deref().unwrap_or("-"),
            size = data.len(),
            "File uploaded"
        );

        return Ok(Json(UploadFileResponse {
            file: file_name,
            size: data.len(),
        }));
    }

    Err(ApiError::Unprocessable(format!(
        "Field required: {}",
        FILE_FIELD
    )))
}
