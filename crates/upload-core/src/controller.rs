//! Upload form controller
//!
//! Drives one submission: validate, send, interpret the reply, show status.
//! Each submission starts from scratch; the only state kept between
//! submissions is the in-flight count and the display generation used by
//! [`ClearPolicy::ResetOnDisplay`].

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{ClearPolicy, ControllerConfig};
use crate::error::UploadError;
use crate::host::{FileInput, StatusSink, UploadForm, UploadTransport};
use crate::models::{
    SelectedFile, StatusMessage, SubmissionState, UploadRequest, UploadResponse,
    FALLBACK_FAILURE_TEXT, SUCCESS_TEXT,
};
use crate::scheduler::ClearScheduler;

/// Collaborators a controller is wired to
#[derive(Clone)]
pub struct ControllerParts {
    pub form: Arc<dyn UploadForm>,
    pub file_input: Arc<dyn FileInput>,
    pub status: Arc<dyn StatusSink>,
    pub transport: Arc<dyn UploadTransport>,
    pub scheduler: Arc<dyn ClearScheduler>,
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No file selected, nothing was sent
    Rejected,
    /// Upload accepted by the endpoint
    Succeeded,
    /// Upload attempted and failed
    Failed(UploadError),
    /// Dropped because another upload is pending (in-flight guard only)
    Ignored,
}

/// Controller for a single upload form
pub struct UploadController {
    config: ControllerConfig,
    form: Arc<dyn UploadForm>,
    file_input: Arc<dyn FileInput>,
    status: Arc<dyn StatusSink>,
    transport: Arc<dyn UploadTransport>,
    scheduler: Arc<dyn ClearScheduler>,
    in_flight: AtomicUsize,
    display_generation: Arc<AtomicU64>,
}

/// Decrements the in-flight count when a submission ends
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl UploadController {
    /// Wire a controller to its form, file input, status element and transport
    pub fn new(config: ControllerConfig, parts: ControllerParts) -> Self {
        Self {
            config,
            form: parts.form,
            file_input: parts.file_input,
            status: parts.status,
            transport: parts.transport,
            scheduler: parts.scheduler,
            in_flight: AtomicUsize::new(0),
            display_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Current submission state
    pub fn state(&self) -> SubmissionState {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            SubmissionState::Pending
        } else {
            SubmissionState::Idle
        }
    }

    /// Handle a form submission
    ///
    /// Never fails: every error ends up as a displayed status message and in
    /// the log. The returned outcome is for the host.
    #[instrument(skip(self))]
    pub async fn handle_submit(&self) -> SubmitOutcome {
        let Some(_in_flight) = self.begin_submission() else {
            debug!("Submission ignored, upload already pending");
            return SubmitOutcome::Ignored;
        };

        let Some(file) = self.file_input.selected_files().into_iter().next() else {
            let err = UploadError::NoFileSelected;
            warn!(error = %err, kind = err.kind(), "Upload rejected");
            self.display_status(err.status_message());
            return SubmitOutcome::Rejected;
        };

        match self.upload(file).await {
            Ok(()) => {
                self.display_status(StatusMessage::success(SUCCESS_TEXT));
                self.form.reset();
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!(error = %err, kind = err.kind(), "Upload error");
                self.display_status(err.status_message());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Show `message` and schedule it to be cleared after the configured delay
    pub fn display_status(&self, message: StatusMessage) {
        self.status.render(&message);

        let generation = self.display_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.display_generation);
        let status = Arc::clone(&self.status);
        let policy = self.config.clear_policy;

        self.scheduler.schedule(
            self.config.clear_after(),
            Box::new(move || {
                if policy == ClearPolicy::ResetOnDisplay
                    && latest.load(Ordering::SeqCst) != generation
                {
                    return;
                }
                status.clear();
            }),
        );
    }

    fn begin_submission(&self) -> Option<InFlight<'_>> {
        if self.config.guard_in_flight {
            self.in_flight
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .ok()?;
        } else {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
        }
        Some(InFlight(&self.in_flight))
    }

    async fn upload(&self, file: SelectedFile) -> Result<(), UploadError> {
        let file_name = file.file_name.clone();
        let size = file.len();
        let request = UploadRequest::new(self.config.endpoint.as_str(), file);

        debug!(
            endpoint = %request.endpoint,
            file_name = %file_name,
            size,
            "Sending upload"
        );

        let response = self.transport.send(request).await?;
        interpret_response(&response)?;

        info!(file_name = %file_name, size, status = response.status, "File uploaded");
        Ok(())
    }
}

/// Interpret an upload reply
///
/// The body is parsed as JSON before the status is looked at, so a non-JSON
/// body is a parse error even for a 2xx status.
pub fn interpret_response(response: &UploadResponse) -> Result<Value, UploadError> {
    let body: Value =
        serde_json::from_slice(&response.body).map_err(|e| UploadError::Parse(e.to_string()))?;

    if response.is_success() {
        Ok(body)
    } else {
        Err(UploadError::Server {
            status: response.status,
            message: failure_detail(&body),
        })
    }
}

/// Message for a failed upload, taken from the body's `detail`
fn failure_detail(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(detail) if !is_blank(detail) => detail.to_string(),
        _ => FALLBACK_FAILURE_TEXT.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
