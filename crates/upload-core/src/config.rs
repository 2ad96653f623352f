//! Controller configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_ENDPOINT;

/// How deferred clears interact with newer messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Every displayed message schedules its own clear. A clear scheduled
    /// for an older message also wipes a newer one.
    #[default]
    FireAndForget,
    /// A newer message supersedes clears scheduled for older ones
    ResetOnDisplay,
}

/// Configuration for [`crate::UploadController`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Endpoint path uploads are posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Delay before a displayed message is cleared, in milliseconds
    #[serde(default = "default_clear_after_ms")]
    pub clear_after_ms: u64,
    /// Clear timer behavior
    #[serde(default)]
    pub clear_policy: ClearPolicy,
    /// Ignore submissions while an upload is pending
    #[serde(default)]
    pub guard_in_flight: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_clear_after_ms() -> u64 {
    4000
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            clear_after_ms: default_clear_after_ms(),
            clear_policy: ClearPolicy::default(),
            guard_in_flight: false,
        }
    }
}

impl ControllerConfig {
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }
}
