//! Command implementations

pub mod send;
pub mod shell;

use std::sync::Arc;

use anyhow::{Context, Result};
use upload_client::UploadClient;
use upload_core::{
    ControllerConfig, ControllerParts, TokioScheduler, UploadController, UploadTransport,
};

use crate::output::OutputContext;
use crate::terminal::{TerminalForm, TerminalStatus};

/// A controller wired to the terminal and an HTTP client
pub struct Session {
    pub controller: Arc<UploadController>,
    pub form: Arc<TerminalForm>,
    pub status: Arc<TerminalStatus>,
    pub output: Arc<OutputContext>,
}

impl Session {
    pub fn new(server: &str, config: ControllerConfig, output: Arc<OutputContext>) -> Result<Self> {
        let client = UploadClient::new(server)
            .with_context(|| format!("Invalid server URL: {}", server))?
            .with_endpoint(config.endpoint.clone());

        Ok(Self::with_transport(Arc::new(client), config, output))
    }

    /// Wire the terminal to any transport
    pub fn with_transport(
        transport: Arc<dyn UploadTransport>,
        config: ControllerConfig,
        output: Arc<OutputContext>,
    ) -> Self {
        let form = Arc::new(TerminalForm::new());
        let status = Arc::new(TerminalStatus::new(Arc::clone(&output)));

        let controller = UploadController::new(
            config,
            ControllerParts {
                form: form.clone(),
                file_input: form.clone(),
                status: status.clone(),
                transport,
                scheduler: Arc::new(TokioScheduler),
            },
        );

        Self {
            controller: Arc::new(controller),
            form,
            status,
            output,
        }
    }
}
