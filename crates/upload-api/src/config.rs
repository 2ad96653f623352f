//! Server configuration

use std::net::{AddrParseError, SocketAddr};

use serde::{Deserialize, Serialize};

/// Configuration for the upload server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted file, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Accepted file extensions, case-insensitive (e.g. `["pdf"]`).
    /// Empty accepts any file.
    #[serde(default)]
    pub accepted_types: Vec<String>,
    /// Directory served at `/pkg` (the browser module built by wasm-pack)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_assets_dir() -> String {
    "pkg".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            accepted_types: Vec::new(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl ServerConfig {
    /// Socket address built from `host` and `port`
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Whether `file_type` (an upper-cased extension) passes `accepted_types`
    pub fn accepts(&self, file_type: &str) -> bool {
        self.accepted_types.is_empty()
            || self
                .accepted_types
                .iter()
                .any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(file_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8000");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.accepted_types.is_empty());
        assert!(config.accepts("TXT"));
        assert_eq!(config.assets_dir, "pkg");
    }

    #[test]
    fn test_accepted_types() {
        let config: ServerConfig = toml::from_str(r#"accepted_types = ["pdf", ".csv"]"#).unwrap();
        assert!(config.accepts("PDF"));
        assert!(config.accepts("CSV"));
        assert!(!config.accepts("TXT"));
    }

    #[test]
    fn test_partial_toml() {
        let config: ServerConfig = toml::from_str("port = 9090").unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_host() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
