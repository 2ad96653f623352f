//! upload-core - controller for a single-file upload form
//!
//! This crate holds the submission logic of an upload form: validate that a
//! file was picked, send it as one multipart part named `file`, interpret the
//! JSON reply and show a transient status message. It does not know about any
//! concrete UI or HTTP stack. Hosts plug in through the traits in [`host`]
//! and [`scheduler`].
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use upload_core::{ControllerConfig, ControllerParts, TokioScheduler, UploadController};
//!
//! let controller = UploadController::new(
//!     ControllerConfig::default(),
//!     ControllerParts {
//!         form: form.clone(),
//!         file_input: form,
//!         status: Arc::new(terminal_status),
//!         transport: Arc::new(upload_client),
//!         scheduler: Arc::new(TokioScheduler),
//!     },
//! );
//!
//! let outcome = controller.handle_submit().await;
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod models;
pub mod scheduler;
pub mod testing;

pub use config::{ClearPolicy, ControllerConfig};
pub use controller::{interpret_response, ControllerParts, SubmitOutcome, UploadController};
pub use error::{TransportError, UploadError};
pub use host::{FileInput, StatusSink, UploadForm, UploadTransport};
pub use models::*;
pub use scheduler::{ClearScheduler, ClearTask, TokioScheduler};
