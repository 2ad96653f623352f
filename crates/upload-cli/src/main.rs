//! Upload CLI - Command-line host for the upload form
//!
//! Drives the upload form controller from a terminal: pick a file, submit,
//! see the transient status message.

mod commands;
mod config;
mod output;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use upload_core::SubmitOutcome;

use crate::commands::Session;
use crate::config::{ArgOverrides, Config};
use crate::output::OutputContext;

#[derive(Parser)]
#[command(name = "upload-cli")]
#[command(author, version, about = "Upload files to an upload server")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "UPLOAD_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "UPLOAD_CONFIG")]
    config: Option<PathBuf>,

    /// Delay before the status message is cleared, in milliseconds
    #[arg(long)]
    clear_after_ms: Option<u64>,

    /// Let a newer message cancel the pending clear of an older one
    #[arg(long)]
    reset_clear_timer: bool,

    /// Ignore submissions while an upload is pending
    #[arg(long)]
    guard_in_flight: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the upload form once
    Send {
        /// File to upload; omit to submit with nothing picked
        file: Option<PathBuf>,

        /// Exit right after the upload instead of waiting for the message to clear
        #[arg(long)]
        no_wait: bool,
    },

    /// Interactive session: pick files and submit repeatedly
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("upload_cli=debug,upload_core=debug,upload_client=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config file
    let file_config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let merged = file_config.merge_with_args(&ArgOverrides {
        server: cli.server.clone(),
        no_color: cli.no_color,
        clear_after_ms: cli.clear_after_ms,
        reset_clear_timer: cli.reset_clear_timer,
        guard_in_flight: cli.guard_in_flight,
    });

    let output = Arc::new(OutputContext::new(merged.no_color, cli.quiet));
    let session = Session::new(&merged.server, merged.controller, output)?;

    match cli.command {
        Commands::Send { file, no_wait } => {
            let outcome = commands::send::run(&session, file.as_deref(), !no_wait).await?;
            Ok(match outcome {
                SubmitOutcome::Succeeded => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Commands::Shell => {
            commands::shell::run(&session).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
