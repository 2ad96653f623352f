//! Interactive form session
//!
//! Reads commands from stdin, one per line:
//! `pick <path>`, `submit`, `status`, `help`, `quit`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use upload_client::load_file;
use upload_core::SubmitOutcome;

use super::Session;

/// A parsed shell line
#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Pick(PathBuf),
    Submit,
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse one input line
pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" => ShellCommand::Empty,
        "pick" if !rest.is_empty() => ShellCommand::Pick(PathBuf::from(rest)),
        "submit" => ShellCommand::Submit,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

const HELP: &str = "Commands:
  pick <path>  choose the file to upload
  submit       submit the form
  status       show the picked file and displayed message
  quit         leave";

/// Run the shell on stdin until `quit` or end of input
pub async fn run(session: &Session) -> Result<()> {
    run_lines(session, BufReader::new(tokio::io::stdin())).await
}

/// Run the shell on `input`
///
/// Each `submit` runs as its own task, so further lines are read while
/// uploads are pending. Pending uploads are awaited before returning.
pub async fn run_lines<R>(session: &Session, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut uploads: JoinSet<SubmitOutcome> = JoinSet::new();
    session.output.info(HELP);

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            ShellCommand::Empty => {}
            ShellCommand::Pick(path) => match load_file(&path).await {
                Ok(file) => {
                    session
                        .output
                        .info(&format!("Picked {} ({} bytes)", file.file_name, file.len()));
                    session.form.pick(file);
                }
                Err(e) => session
                    .output
                    .error(&format!("Cannot pick {}: {}", path.display(), e)),
            },
            ShellCommand::Submit => {
                let controller = Arc::clone(&session.controller);
                uploads.spawn(async move { controller.handle_submit().await });
            }
            ShellCommand::Status => {
                let picked = match session.form.picked() {
                    Some((name, size)) => format!("{} ({} bytes)", name, size),
                    None => "(none)".to_string(),
                };
                let text = session.status.text();
                session.output.info(&format!("File: {}", picked));
                session.output.info(&format!(
                    "Message: {}",
                    if text.is_empty() { "(empty)" } else { text.as_str() }
                ));
            }
            ShellCommand::Help => session.output.info(HELP),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(input) => session
                .output
                .error(&format!("Unknown command: {} (try 'help')", input)),
        }

        while let Some(done) = uploads.try_join_next() {
            log_finished(done);
        }
    }

    if !uploads.is_empty() {
        session
            .output
            .info(&format!("Waiting for {} pending upload(s)", uploads.len()));
    }
    while let Some(done) = uploads.join_next().await {
        log_finished(done);
    }

    Ok(())
}

fn log_finished(done: Result<SubmitOutcome, tokio::task::JoinError>) {
    match done {
        Ok(outcome) => tracing::debug!(?outcome, "Submission finished"),
        Err(e) => tracing::error!(error = %e, "Submission task failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;
    use upload_core::{
        ControllerConfig, TransportError, UploadRequest, UploadResponse, UploadTransport,
    };

    use crate::output::OutputContext;

    /// Answers only once two requests are in flight together
    struct BarrierTransport {
        barrier: Barrier,
        sent: AtomicUsize,
    }

    #[async_trait]
    impl UploadTransport for BarrierTransport {
        async fn send(&self, request: UploadRequest) -> Result<UploadResponse, TransportError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            self.barrier.wait().await;
            let body = format!(r#"{{"file": "{}"}}"#, request.file.file_name);
            Ok(UploadResponse::new(200, body))
        }
    }

    #[tokio::test]
    async fn test_submissions_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"abc").unwrap();

        let transport = Arc::new(BarrierTransport {
            barrier: Barrier::new(2),
            sent: AtomicUsize::new(0),
        });
        let session = Session::with_transport(
            transport.clone(),
            ControllerConfig::default(),
            Arc::new(OutputContext::new(true, true)),
        );
        let input = format!("pick {}\nsubmit\nsubmit\nquit\n", path.display());

        // Each request waits for the other, so sequential submits never finish
        tokio::time::timeout(
            Duration::from_secs(5),
            run_lines(&session, input.as_bytes()),
        )
        .await
        .expect("submissions did not overlap")
        .unwrap();

        assert_eq!(transport.sent.load(Ordering::SeqCst), 2);
        assert_eq!(session.status.text(), "File uploaded successfully!");
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("pick  ./docs/report v2.pdf "),
            ShellCommand::Pick(PathBuf::from("./docs/report v2.pdf"))
        );
        assert_eq!(parse_line("submit"), ShellCommand::Submit);
        assert_eq!(parse_line("  status"), ShellCommand::Status);
        assert_eq!(parse_line("?"), ShellCommand::Help);
        assert_eq!(parse_line("exit"), ShellCommand::Quit);
        assert_eq!(parse_line("   "), ShellCommand::Empty);
    }

    #[test]
    fn test_pick_needs_path() {
        assert_eq!(parse_line("pick"), ShellCommand::Unknown("pick".to_string()));
        assert_eq!(
            parse_line("upload x"),
            ShellCommand::Unknown("upload x".to_string())
        );
    }
}
