//! Upload HTTP Client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, instrument};
use upload_core::{
    interpret_response, SelectedFile, TransportError, UploadError, UploadRequest, UploadResponse,
    UploadTransport, DEFAULT_ENDPOINT,
};
use url::Url;

use crate::error::{Result, UploadClientError};
use crate::types::UploadReceipt;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the upload server
#[derive(Debug, Clone)]
pub struct UploadClient {
    client: Client,
    base_url: Url,
    endpoint: String,
}

impl UploadClient {
    /// Create a new upload client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the upload server (e.g., "http://localhost:8000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new upload client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client,
            base_url,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Use a different endpoint path for [`UploadClient::upload`]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await.map_err(send_error)?;
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            Err(UploadClientError::server_error(
                status.as_u16(),
                format!("HTTP {}", status),
            ))
        }
    }

    /// Upload one file and decode the receipt
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload(&self, file: &SelectedFile) -> Result<UploadReceipt> {
        let request = UploadRequest::new(self.endpoint.as_str(), file.clone());
        let response = self.post_file(&request).await?;

        match interpret_response(&response) {
            Ok(body) => serde_json::from_value(body)
                .map_err(|e| UploadClientError::ParseError(e.to_string())),
            Err(UploadError::Server { status, message }) => {
                Err(UploadClientError::server_error(status, message))
            }
            Err(e) => Err(UploadClientError::ParseError(e.to_string())),
        }
    }

    /// Post `request` as multipart and return the raw reply for any status
    pub async fn post_file(&self, request: &UploadRequest) -> Result<UploadResponse> {
        let url = self.base_url.join(&request.endpoint)?;
        let form = build_form(request)?;

        debug!(
            %url,
            file_name = %request.file.file_name,
            size = request.file.len(),
            "Posting file"
        );

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(send_error)?;

        debug!(status, body_len = body.len(), "Upload response");
        Ok(UploadResponse::new(status, body))
    }
}

#[async_trait]
impl UploadTransport for UploadClient {
    async fn send(
        &self,
        request: UploadRequest,
    ) -> std::result::Result<UploadResponse, TransportError> {
        self.post_file(&request).await.map_err(TransportError::from)
    }
}

/// Multipart form with a single file part
fn build_form(request: &UploadRequest) -> Result<Form> {
    let file = &request.file;
    let mut part = Part::bytes(file.data.to_vec()).file_name(file.file_name.clone());
    if let Some(content_type) = &file.content_type {
        part = part.mime_str(content_type)?;
    }
    Ok(Form::new().part(request.field_name, part))
}

fn send_error(err: reqwest::Error) -> UploadClientError {
    if err.is_timeout() {
        UploadClientError::Timeout
    } else {
        UploadClientError::HttpError(err)
    }
}
