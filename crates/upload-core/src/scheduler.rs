//! Deferred status clearing

use std::time::Duration;

use tokio::runtime::Handle;

/// One-shot action run after a delay
pub type ClearTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after a delay
///
/// Scheduled tasks cannot be cancelled; callers that need to supersede an
/// older task check a generation when the task fires.
pub trait ClearScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: ClearTask);
}

/// Scheduler backed by the current tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl ClearScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ClearTask) {
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    task();
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "No tokio runtime, deferred clear dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        TokioScheduler.schedule(
            Duration::from_millis(4000),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );

        tokio::time::sleep(Duration::from_millis(3999)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_without_runtime_does_not_panic() {
        TokioScheduler.schedule(Duration::from_millis(1), Box::new(|| {}));
    }
}
