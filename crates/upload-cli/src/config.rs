//! Configuration file handling for upload-cli

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use upload_core::{ClearPolicy, ControllerConfig};

const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default server URL
    pub server: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
    /// Upload form controller settings
    #[serde(default)]
    pub controller: ControllerConfig,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("upload-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(&self, args: &ArgOverrides) -> MergedConfig {
        let mut controller = self.controller.clone();
        if let Some(ms) = args.clear_after_ms {
            controller.clear_after_ms = ms;
        }
        if args.reset_clear_timer {
            controller.clear_policy = ClearPolicy::ResetOnDisplay;
        }
        if args.guard_in_flight {
            controller.guard_in_flight = true;
        }

        MergedConfig {
            server: args
                .server
                .clone()
                .or_else(|| self.server.clone())
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            no_color: args.no_color || self.no_color.unwrap_or(false),
            controller,
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ArgOverrides {
    pub server: Option<String>,
    pub no_color: bool,
    pub clear_after_ms: Option<u64>,
    pub reset_clear_timer: bool,
    pub guard_in_flight: bool,
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub server: String,
    pub no_color: bool,
    pub controller: ControllerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let merged = Config::default().merge_with_args(&ArgOverrides::default());
        assert_eq!(merged.server, "http://localhost:8000");
        assert!(!merged.no_color);
        assert_eq!(merged.controller, ControllerConfig::default());
    }

    #[test]
    fn test_args_override_file() {
        let config: Config = toml::from_str(
            r#"
            server = "http://files.local:9000"
            no_color = true

            [controller]
            clear_after_ms = 2000
            "#,
        )
        .unwrap();

        let merged = config.merge_with_args(&ArgOverrides {
            server: Some("http://127.0.0.1:8000".to_string()),
            reset_clear_timer: true,
            ..ArgOverrides::default()
        });

        assert_eq!(merged.server, "http://127.0.0.1:8000");
        assert!(merged.no_color);
        assert_eq!(merged.controller.clear_after_ms, 2000);
        assert_eq!(merged.controller.clear_policy, ClearPolicy::ResetOnDisplay);
        assert!(!merged.controller.guard_in_flight);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[controller]\nguard_in_flight = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.controller.guard_in_flight);
        assert!(config.server.is_none());
    }
}
