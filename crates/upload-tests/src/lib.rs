//! Shared setup for end-to-end tests
//!
//! Wires an [`UploadController`] to the real HTTP client, pointed at a real
//! upload server, with an in-memory form and a manually fired scheduler.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use parking_lot::Mutex;
use upload_api::{create_router, AppState, ServerConfig};
use upload_client::testing::TestServer;
use upload_client::UploadClient;
use upload_core::testing::{ManualScheduler, MemoryForm, RecordingStatus};
use upload_core::{ControllerConfig, ControllerParts, UploadController};

/// Controller plus the doubles it talks to
pub struct FormHarness {
    pub controller: UploadController,
    pub form: Arc<MemoryForm>,
    pub status: Arc<RecordingStatus>,
    pub scheduler: Arc<ManualScheduler>,
}

impl FormHarness {
    /// Wire a controller to `client`
    pub fn new(client: UploadClient, config: ControllerConfig) -> Self {
        let form = Arc::new(MemoryForm::new());
        let status = Arc::new(RecordingStatus::new());
        let scheduler = Arc::new(ManualScheduler::new());

        let controller = UploadController::new(
            config,
            ControllerParts {
                form: form.clone(),
                file_input: form.clone(),
                status: status.clone(),
                transport: Arc::new(client),
                scheduler: scheduler.clone(),
            },
        );

        Self {
            controller,
            form,
            status,
            scheduler,
        }
    }
}

/// Start the upload server with the given size limit
pub async fn start_server(max_upload_bytes: usize) -> TestServer {
    let state = AppState::new(ServerConfig {
        max_upload_bytes,
        ..ServerConfig::default()
    });
    TestServer::start(create_router(state))
        .await
        .expect("Failed to start test server")
}

/// One multipart part as the recording server saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPart {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Parts received by [`start_recording_server`], in arrival order
pub type ReceivedParts = Arc<Mutex<Vec<ReceivedPart>>>;

async fn record_parts(
    State(received): State<ReceivedParts>,
    mut multipart: Multipart,
) -> Json<serde_json::Value> {
    let mut count = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap_or_default();
        received.lock().push(ReceivedPart {
            name,
            file_name,
            content_type,
            data,
        });
        count += 1;
    }
    Json(serde_json::json!({ "parts": count }))
}

/// Start a server whose `/upload` keeps every multipart part it receives
pub async fn start_recording_server() -> (TestServer, ReceivedParts) {
    let received = ReceivedParts::default();
    let router = Router::new()
        .route("/upload", post(record_parts))
        .with_state(received.clone());
    let server = TestServer::start(router)
        .await
        .expect("Failed to start recording server");
    (server, received)
}
