//! One-shot upload

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use upload_client::load_file;
use upload_core::SubmitOutcome;

use super::Session;

/// Submit the form once, optionally with `file` picked
///
/// With `wait`, returns only after the status message has been cleared.
pub async fn run(session: &Session, file: Option<&Path>, wait: bool) -> Result<SubmitOutcome> {
    if let Some(path) = file {
        let selected = load_file(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        session.form.pick(selected);
    }

    let outcome = session.controller.handle_submit().await;

    if wait {
        let delay = session.controller.config().clear_after() + Duration::from_millis(50);
        tokio::time::sleep(delay).await;
    }

    Ok(outcome)
}
