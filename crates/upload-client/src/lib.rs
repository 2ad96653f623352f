//! Upload Client Library
//!
//! Typed HTTP client for the `/upload` endpoint. [`UploadClient`] also
//! implements [`upload_core::UploadTransport`], so it can be handed straight
//! to an [`upload_core::UploadController`].
//!
//! # Example
//!
//! ```rust,no_run
//! use upload_client::{load_file, UploadClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UploadClient::new("http://localhost:8000")?;
//!
//!     let file = load_file("report.pdf").await?;
//!     let receipt = client.upload(&file).await?;
//!     println!("{} ({} bytes)", receipt.file, receipt.size);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! ```rust,ignore
//! use upload_client::testing::TestServer;
//! use upload_api::{create_router, AppState};
//!
//! let server = TestServer::start(create_router(AppState::default())).await?;
//! let health = server.client.health().await?;
//! ```

mod client;
mod error;
mod files;
pub mod testing;
mod types;

pub use client::UploadClient;
pub use error::{Result, UploadClientError};
pub use files::load_file;
pub use types::*;

// Re-export core types for convenience
pub use upload_core::{SelectedFile, UploadRequest, UploadResponse};
