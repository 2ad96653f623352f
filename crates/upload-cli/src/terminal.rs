//! Terminal implementations of the form, file input and status element

use std::sync::Arc;

use parking_lot::Mutex;
use upload_core::{FileInput, SelectedFile, StatusMessage, StatusSink, UploadForm};

use crate::output::OutputContext;

/// Form holding at most one picked file
#[derive(Default)]
pub struct TerminalForm {
    picked: Mutex<Option<SelectedFile>>,
}

impl TerminalForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection
    pub fn pick(&self, file: SelectedFile) {
        *self.picked.lock() = Some(file);
    }

    /// Name and size of the picked file
    pub fn picked(&self) -> Option<(String, usize)> {
        self.picked
            .lock()
            .as_ref()
            .map(|f| (f.file_name.clone(), f.len()))
    }
}

impl UploadForm for TerminalForm {
    fn reset(&self) {
        *self.picked.lock() = None;
    }
}

impl FileInput for TerminalForm {
    fn selected_files(&self) -> Vec<SelectedFile> {
        self.picked.lock().iter().cloned().collect()
    }
}

/// Status element printing to the terminal
pub struct TerminalStatus {
    output: Arc<OutputContext>,
    current: Mutex<Option<StatusMessage>>,
}

impl TerminalStatus {
    pub fn new(output: Arc<OutputContext>) -> Self {
        Self {
            output,
            current: Mutex::new(None),
        }
    }

    /// Text currently on display; empty once cleared
    pub fn text(&self) -> String {
        self.current
            .lock()
            .as_ref()
            .map(|m| m.text.clone())
            .unwrap_or_default()
    }
}

impl StatusSink for TerminalStatus {
    fn render(&self, message: &StatusMessage) {
        *self.current.lock() = Some(message.clone());
        self.output.status(message);
    }

    fn clear(&self) {
        if let Some(current) = self.current.lock().as_mut() {
            current.text.clear();
        }
        tracing::debug!("Status message cleared");
    }
}
