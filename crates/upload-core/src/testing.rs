//! Test doubles for the host seams
//!
//! In-memory form, recording status element, scripted transport and a
//! manually fired scheduler. Used by this crate's tests and by hosts that
//! want to exercise the controller without a UI.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::ControllerConfig;
use crate::controller::{ControllerParts, UploadController};
use crate::error::TransportError;
use crate::host::{FileInput, StatusSink, UploadForm, UploadTransport};
use crate::models::{SelectedFile, Severity, StatusMessage, UploadRequest, UploadResponse};
use crate::scheduler::{ClearScheduler, ClearTask};

// =============================================================================
// Form + file input
// =============================================================================

/// Form whose file input holds an in-memory selection
#[derive(Default)]
pub struct MemoryForm {
    files: Mutex<Vec<SelectedFile>>,
    resets: AtomicUsize,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the selection
    pub fn select(&self, file: SelectedFile) {
        self.files.lock().push(file);
    }

    /// Number of times the form was reset
    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl UploadForm for MemoryForm {
    fn reset(&self) {
        self.files.lock().clear();
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

impl FileInput for MemoryForm {
    fn selected_files(&self) -> Vec<SelectedFile> {
        self.files.lock().clone()
    }
}

// =============================================================================
// Status element
// =============================================================================

/// Something that happened to the status element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Rendered(StatusMessage),
    Cleared,
}

/// Status element that records everything it is asked to do
#[derive(Default)]
pub struct RecordingStatus {
    current: Mutex<Option<StatusMessage>>,
    events: Mutex<Vec<StatusEvent>>,
}

impl RecordingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed text; empty when nothing is shown
    pub fn text(&self) -> String {
        self.current
            .lock()
            .as_ref()
            .map(|m| m.text.clone())
            .unwrap_or_default()
    }

    /// Severity of the last rendered message. Clearing keeps the severity,
    /// only the text goes away.
    pub fn severity(&self) -> Option<Severity> {
        self.current.lock().as_ref().map(|m| m.severity)
    }

    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().clone()
    }
}

impl StatusSink for RecordingStatus {
    fn render(&self, message: &StatusMessage) {
        *self.current.lock() = Some(message.clone());
        self.events.lock().push(StatusEvent::Rendered(message.clone()));
    }

    fn clear(&self) {
        if let Some(current) = self.current.lock().as_mut() {
            current.text.clear();
        }
        self.events.lock().push(StatusEvent::Cleared);
    }
}

// =============================================================================
// Transport
// =============================================================================

/// Transport that replays queued replies and records requests
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<UploadResponse, TransportError>>>,
    requests: Mutex<Vec<UploadRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply
    pub fn respond(&self, response: UploadResponse) {
        self.replies.lock().push_back(Ok(response));
    }

    /// Queue a transport failure
    pub fn fail(&self, error: TransportError) {
        self.replies.lock().push_back(Err(error));
    }

    /// Requests sent so far
    pub fn requests(&self) -> Vec<UploadRequest> {
        self.requests.lock().clone()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl UploadTransport for ScriptedTransport {
    async fn send(&self, request: UploadRequest) -> Result<UploadResponse, TransportError> {
        self.requests.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted reply")))
    }
}

// =============================================================================
// Scheduler
// =============================================================================

/// Scheduler whose tasks run only when the test fires them
#[derive(Default)]
pub struct ManualScheduler {
    tasks: Mutex<VecDeque<(Duration, ClearTask)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays of the tasks still waiting
    pub fn delays(&self) -> Vec<Duration> {
        self.tasks.lock().iter().map(|(delay, _)| *delay).collect()
    }

    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run the oldest waiting task. Returns false if none was waiting.
    pub fn fire_next(&self) -> bool {
        let task = self.tasks.lock().pop_front();
        match task {
            Some((_, task)) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run all waiting tasks in scheduling order
    pub fn fire_all(&self) {
        while self.fire_next() {}
    }
}

impl ClearScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ClearTask) {
        self.tasks.lock().push_back((delay, task));
    }
}

// =============================================================================
// Harness
// =============================================================================

/// A controller wired to test doubles
pub struct Harness {
    pub controller: UploadController,
    pub form: Arc<MemoryForm>,
    pub status: Arc<RecordingStatus>,
    pub transport: Arc<ScriptedTransport>,
    pub scheduler: Arc<ManualScheduler>,
}

impl Harness {
    pub fn new(config: ControllerConfig) -> Self {
        let transport = Arc::new(ScriptedTransport::new());
        Self::build(config, transport.clone(), transport)
    }

    /// Harness with a custom transport; `self.transport` stays unused
    pub fn with_transport(config: ControllerConfig, transport: Arc<dyn UploadTransport>) -> Self {
        Self::build(config, Arc::new(ScriptedTransport::new()), transport)
    }

    fn build(
        config: ControllerConfig,
        scripted: Arc<ScriptedTransport>,
        transport: Arc<dyn UploadTransport>,
    ) -> Self {
        let form = Arc::new(MemoryForm::new());
        let status = Arc::new(RecordingStatus::new());
        let scheduler = Arc::new(ManualScheduler::new());

        let controller = UploadController::new(
            config,
            ControllerParts {
                form: form.clone(),
                file_input: form.clone(),
                status: status.clone(),
                transport,
                scheduler: scheduler.clone(),
            },
        );

        Self {
            controller,
            form,
            status,
            transport: scripted,
            scheduler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_order() {
        let scheduler = ManualScheduler::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let log = Arc::clone(&log);
            scheduler.schedule(Duration::from_millis(10), Box::new(move || log.lock().push(i)));
        }
        assert_eq!(scheduler.pending(), 3);

        scheduler.fire_all();
        assert_eq!(*log.lock(), vec![0, 1, 2]);
        assert!(!scheduler.fire_next());
    }

    #[tokio::test]
    async fn test_scripted_transport_runs_dry() {
        let transport = ScriptedTransport::new();
        let request = UploadRequest::new("/upload", SelectedFile::new("a", "b"));

        let err = transport.send(request).await.unwrap_err();
        assert_eq!(err.message(), "no scripted reply");
        assert_eq!(transport.requests().len(), 1);
    }
}
