//! Terminal output for upload-cli

use colored::Colorize;
use upload_core::{Severity, StatusMessage};

/// Context for output rendering
pub struct OutputContext {
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print a status message in its severity color
    pub fn status(&self, message: &StatusMessage) {
        match message.severity {
            Severity::Success => self.success(&message.text),
            Severity::Error => self.error(&message.text),
        }
    }
}
