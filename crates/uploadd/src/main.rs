//! uploadd - Upload Server Daemon
//!
//! Serves the upload page and accepts single-file uploads on `POST /upload`.
//!
//! Usage:
//!   uploadd [OPTIONS] [config.toml]
//!
//! Options:
//!   -p, --port <port>  Override the configured port
//!
//! If no config file is provided, defaults are used (0.0.0.0:8000).

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upload_api::{create_router, AppState, ServerConfig};

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
    /// Port override
    port: Option<u16>,
    /// Print help and exit
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let args: Vec<String> = args.into_iter().collect();
    let mut result = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                let value = args
                    .get(i + 1)
                    .context("Missing argument for --port")?;
                let port = value
                    .parse()
                    .with_context(|| format!("Invalid port: {}", value))?;
                result.port = Some(port);
                i += 2;
            }
            "--help" | "-h" => {
                result.help = true;
                i += 1;
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
                i += 1;
            }
            _ => {
                tracing::warn!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    Ok(result)
}

fn print_help() {
    eprintln!(
        r#"uploadd - Upload Server Daemon

Usage: uploadd [OPTIONS] [config.toml]

Options:
  -p, --port <port>  Override the configured port
  -h, --help         Print this help message

Config file (all keys optional):
  host = "0.0.0.0"
  port = 8000
  max_upload_bytes = 10485760
  accepted_types = ["pdf"]   # empty or absent accepts any file
  assets_dir = "pkg"         # browser module, served at /pkg

Examples:
  # Run with defaults
  uploadd

  # Run with config file on another port
  uploadd --port 9000 uploadd.toml
"#
    );
}

/// Load the server config file
fn load_config_file(path: &Path) -> anyhow::Result<ServerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "uploadd=info,upload_api=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print_help();
        return Ok(());
    }

    tracing::info!("Starting uploadd (Upload Server Daemon)");

    let mut config = match args.config_path {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path);
            load_config_file(Path::new(path))?
        }
        None => {
            tracing::info!("No config file provided, using defaults");
            ServerConfig::default()
        }
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    let addr = config
        .socket_addr()
        .with_context(|| format!("Invalid listen address: {}:{}", config.host, config.port))?;
    tracing::info!(
        max_upload_bytes = config.max_upload_bytes,
        accepted_types = ?config.accepted_types,
        "Listening on http://{}",
        addr
    );

    let app = create_router(AppState::new(config));

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
